//! Styles for the snipz CLI.
//!
//! Output code asks for styles by meaning (`category`, `script_type`,
//! `placeholder`) rather than by color. Each theme only decides what those
//! meanings look like, so switching `THEME` in the settings file never
//! touches rendering code.
//!
//! Both palettes are built once through `once_cell::sync::Lazy`. `console`
//! drops the escape codes when stdout is not a terminal or `NO_COLOR` is set.

use console::Style;
use once_cell::sync::Lazy;
use snipzapp::settings::Theme;

pub struct Palette {
    pub regular: Style,
    pub muted: Style,
    pub faint: Style,
    pub title: Style,
    pub category: Style,
    pub position: Style,
    pub script_type: Style,
    pub placeholder: Style,
    pub success: Style,
    pub info: Style,
    pub warning: Style,
    pub error: Style,
}

pub static DARK: Lazy<Palette> = Lazy::new(|| Palette {
    regular: Style::new().white(),
    muted: Style::new().color256(246),
    faint: Style::new().color256(240),
    title: Style::new().white().bold(),
    category: Style::new().cyan().bold(),
    position: Style::new().yellow(),
    script_type: Style::new().magenta(),
    placeholder: Style::new().black().on_yellow(),
    success: Style::new().green(),
    info: Style::new().color256(246),
    warning: Style::new().yellow(),
    error: Style::new().red().bold(),
});

pub static LIGHT: Lazy<Palette> = Lazy::new(|| Palette {
    regular: Style::new().black(),
    muted: Style::new().color256(242),
    faint: Style::new().color256(248),
    title: Style::new().black().bold(),
    category: Style::new().blue().bold(),
    position: Style::new().color256(130),
    script_type: Style::new().color256(90),
    placeholder: Style::new().black().on_color256(229),
    success: Style::new().color256(28),
    info: Style::new().color256(242),
    warning: Style::new().color256(130),
    error: Style::new().red().bold(),
});

pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}
