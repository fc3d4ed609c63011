use colored::Colorize;

pub struct Theme {
    pub heading: fn(&str) -> String,
    pub title: fn(&str) -> String,
    pub info: fn(&str) -> String,
    pub price: fn(&str) -> String,
    pub genre: fn(&str) -> String,
    pub distance: fn(&str) -> String,
    pub favorite: fn(&str) -> String,
    pub line: fn(&str) -> String,
    pub chip: fn(&str) -> String,
    pub chip_active: fn(&str) -> String,
    pub status: fn(&str) -> String,
    pub error: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "temp" | "" => Self::temp(),
            "wudao" => Self::wudao(),
            "canvas" => Self::canvas(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::temp()
            }
        }
    }

    fn temp() -> Self {
        Self {
            heading: |s| s.bright_magenta().bold().underline().to_string(),
            title: |s| s.bright_white().bold().to_string(),
            info: |s| s.white().to_string(),
            price: |s| s.green().bold().to_string(),
            genre: |s| s.cyan().italic().to_string(),
            distance: |s| s.yellow().to_string(),
            favorite: |s| s.bright_red().to_string(),
            line: |s| s.bright_black().dimmed().to_string(),
            chip: |s| s.bright_black().to_string(),
            chip_active: |s| s.bright_magenta().bold().to_string(),
            status: |s| s.bright_white().dimmed().italic().to_string(),
            error: |s| s.red().bold().to_string(),
        }
    }

    fn wudao() -> Self {
        Self {
            heading: |s| s.bright_red().bold().to_string(),
            title: |s| s.red().bold().to_string(),
            info: |s| s.normal().to_string(),
            price: |s| s.bright_green().to_string(),
            genre: |s| s.bright_blue().to_string(),
            distance: |s| s.bright_yellow().to_string(),
            favorite: |s| s.bright_red().bold().to_string(),
            line: |s| s.bright_black().to_string(),
            chip: |s| s.normal().to_string(),
            chip_active: |s| s.bright_red().underline().to_string(),
            status: |s| s.bright_black().to_string(),
            error: |s| s.bright_red().bold().to_string(),
        }
    }

    fn canvas() -> Self {
        Self {
            heading: |s| s.bold().to_string(),
            title: |s| s.bold().to_string(),
            info: |s| s.normal().to_string(),
            price: |s| s.normal().to_string(),
            genre: |s| s.italic().to_string(),
            distance: |s| s.normal().to_string(),
            favorite: |s| s.bold().to_string(),
            line: |s| s.dimmed().to_string(),
            chip: |s| s.normal().to_string(),
            chip_active: |s| s.bold().underline().to_string(),
            status: |s| s.dimmed().to_string(),
            error: |s| s.bold().to_string(),
        }
    }
}
