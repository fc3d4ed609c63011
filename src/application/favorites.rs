use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteState {
    Favorited,
    NotFavorited,
}

impl FavoriteState {
    pub fn flipped(self) -> Self {
        match self {
            Self::Favorited => Self::NotFavorited,
            Self::NotFavorited => Self::Favorited,
        }
    }
}

/// Change applied locally and waiting for the backend to confirm it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingToggle {
    pub event_id: i64,
    pub previous: FavoriteState,
    pub desired: FavoriteState,
}

/// Favorited event ids for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: BTreeSet<i64>,
}

impl Favorites {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn state(&self, event_id: i64) -> FavoriteState {
        if self.ids.contains(&event_id) {
            FavoriteState::Favorited
        } else {
            FavoriteState::NotFavorited
        }
    }

    pub fn contains(&self, event_id: i64) -> bool {
        self.ids.contains(&event_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied()
    }

    /// Optimistically flip `event_id`, returning the change to confirm.
    pub fn toggle(&mut self, event_id: i64) -> PendingToggle {
        let previous = self.state(event_id);
        let desired = previous.flipped();
        self.set(event_id, desired);
        PendingToggle {
            event_id,
            previous,
            desired,
        }
    }

    /// Undo a rejected toggle. Restores the recorded previous state for that id
    /// only, so it is safe to apply after later toggles have landed.
    pub fn rollback(&mut self, pending: &PendingToggle) {
        self.set(pending.event_id, pending.previous);
    }

    fn set(&mut self, event_id: i64, state: FavoriteState) {
        match state {
            FavoriteState::Favorited => {
                self.ids.insert(event_id);
            }
            FavoriteState::NotFavorited => {
                self.ids.remove(&event_id);
            }
        }
    }
}
