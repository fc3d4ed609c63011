use crate::application::view::{EventCard, GenreChip, Page, View};
use crate::domain::model::User;
use crate::presentation::theme::Theme;
use std::fmt::Write;
use std::sync::{Arc, Mutex, MutexGuard};

/// Everything the page currently shows.
#[derive(Debug, Default, Clone)]
pub struct Screen {
    pub page: Option<Page>,
    pub chips: Vec<GenreChip>,
    pub heading: String,
    pub location_status: String,
    pub user: Option<User>,
    pub alerts: Vec<String>,
}

/// View that keeps the latest frame so the CLI can print it once at the end.
#[derive(Clone, Default)]
pub struct TerminalView {
    screen: Arc<Mutex<Screen>>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> Screen {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Screen> {
        self.screen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl View for TerminalView {
    fn render(&mut self, page: Page) {
        self.lock().page = Some(page);
    }

    fn genres(&mut self, chips: Vec<GenreChip>, heading: String) {
        let mut screen = self.lock();
        screen.chips = chips;
        screen.heading = heading;
    }

    fn location_status(&mut self, text: String) {
        self.lock().location_status = text;
    }

    fn session(&mut self, user: Option<User>) {
        self.lock().user = user;
    }

    fn alert(&mut self, message: String) {
        self.lock().alerts.push(message);
    }
}

pub fn format_screen(screen: &Screen, theme: &Theme, enable_emoji: bool) -> String {
    let mut output = String::new();

    for alert in &screen.alerts {
        let prefix = if enable_emoji { "⚠️ " } else { "!" };
        writeln!(output, "{} {}", prefix, (theme.error)(alert)).ok();
    }

    if let Some(user) = &screen.user {
        let badge = if user.is_admin() { " [admin]" } else { "" };
        writeln!(
            output,
            "[{}] {}{}",
            user.initial(),
            user.name.as_deref().unwrap_or("Signed in"),
            badge
        )
        .ok();
    }

    if !screen.chips.is_empty() {
        let chips: Vec<String> = screen
            .chips
            .iter()
            .map(|chip| {
                if chip.active {
                    (theme.chip_active)(&chip.label)
                } else {
                    (theme.chip)(&chip.label)
                }
            })
            .collect();
        writeln!(output, "{}", chips.join("  ")).ok();
    }

    let heading = if screen.heading.is_empty() {
        "All Events"
    } else {
        screen.heading.as_str()
    };
    writeln!(output, "{}", (theme.heading)(heading)).ok();
    if !screen.location_status.is_empty() {
        writeln!(output, "{}", (theme.status)(&screen.location_status)).ok();
    }
    writeln!(output).ok();

    match &screen.page {
        None | Some(Page::Loading) => {
            writeln!(output, "  Loading events...").ok();
        }
        Some(Page::Empty) => {
            writeln!(output, "  {}", (theme.title)("No events found")).ok();
            writeln!(output, "  Try adjusting your search or filters").ok();
        }
        Some(Page::Error(message)) => {
            writeln!(output, "  {}", (theme.error)("Unable to load events")).ok();
            let message = if message.is_empty() {
                "Please try again later"
            } else {
                message.as_str()
            };
            writeln!(output, "  {}", message).ok();
        }
        Some(Page::Events(cards)) => {
            let cutoff = "⸺".repeat(40);
            for card in cards {
                format_card(&mut output, card, theme, enable_emoji);
                writeln!(output, "  {}", (theme.line)(&cutoff)).ok();
            }
        }
    }

    output
}

fn format_card(output: &mut String, card: &EventCard, theme: &Theme, enable_emoji: bool) {
    writeln!(
        output,
        "  {} {}  {}",
        (theme.line)(&format!("#{}", card.id)),
        (theme.title)(&card.title),
        (theme.price)(&card.price)
    )
    .ok();

    let time = card
        .time
        .as_deref()
        .map(|t| format!(" • {}", t))
        .unwrap_or_default();
    writeln!(
        output,
        "    {}",
        (theme.info)(&format!("{} • {}{}", card.location, card.date, time))
    )
    .ok();

    if let Some(distance) = card.distance_km {
        let pin = if enable_emoji { "📍 " } else { "" };
        writeln!(
            output,
            "    {}",
            (theme.distance)(&format!("{}{:.1} km away", pin, distance))
        )
        .ok();
    }

    if let Some(genre) = &card.genre {
        writeln!(output, "    {}", (theme.genre)(genre)).ok();
    }

    if card.favorited {
        let label = if enable_emoji { "❤️ Favorited" } else { "Favorited" };
        writeln!(output, "    {}", (theme.favorite)(label)).ok();
    }
}
