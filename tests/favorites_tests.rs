//! 收藏状态机测试

use nearby::application::favorites::{FavoriteState, Favorites};

#[test]
fn test_toggle_adds_then_removes() {
    let mut favorites = Favorites::default();

    let pending = favorites.toggle(5);
    assert_eq!(pending.previous, FavoriteState::NotFavorited);
    assert_eq!(pending.desired, FavoriteState::Favorited);
    assert!(favorites.contains(5));

    let pending = favorites.toggle(5);
    assert_eq!(pending.previous, FavoriteState::Favorited);
    assert!(!favorites.contains(5));
}

#[test]
fn test_rollback_restores_previous_state() {
    let mut favorites = Favorites::new([1, 2]);

    let pending = favorites.toggle(2);
    assert!(!favorites.contains(2));
    favorites.rollback(&pending);
    assert!(favorites.contains(2));

    let pending = favorites.toggle(3);
    favorites.rollback(&pending);
    assert_eq!(favorites.state(3), FavoriteState::NotFavorited);
    assert_eq!(favorites.ids().collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_stale_rollback_only_touches_its_event() {
    let mut favorites = Favorites::default();

    let first = favorites.toggle(1);
    let _second = favorites.toggle(2);
    favorites.rollback(&first);

    assert!(!favorites.contains(1));
    assert!(favorites.contains(2));
}

#[test]
fn test_rollback_is_idempotent() {
    let mut favorites = Favorites::default();
    let pending = favorites.toggle(9);

    favorites.rollback(&pending);
    favorites.rollback(&pending);
    assert!(favorites.is_empty());
}
