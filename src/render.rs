// Renderer: pure functions turning locations and readings into styled text.
// Nothing here touches the terminal; callers write the returned strings.
//
// Lines end with "\r\n" because raw mode turns off output post-processing,
// so a bare "\n" would not return the cursor to column 0.

use std::fmt::Write as _;

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{Clear, ClearType};
use crossterm::Command;

use crate::api::{Location, OccupancyReading};

pub const BAR_WIDTH: usize = 30;
const RULE_WIDTH: usize = 54;
pub const COMMAND_HINT: &str = "[R]efresh  [S]witch Location  [Q]uit";
pub const NL: &str = "\r\n";

/// Crowd level bucket shared by the emoji, the status text and the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Full,
    Busy,
    Moderate,
    Available,
}

impl Status {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            Status::Full
        } else if percentage >= 75.0 {
            Status::Busy
        } else if percentage >= 50.0 {
            Status::Moderate
        } else {
            Status::Available
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Status::Full => "🔴",
            Status::Busy => "🟡",
            Status::Moderate => "🟠",
            Status::Available => "🟢",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Status::Full => "FULL - Very Busy",
            Status::Busy => "BUSY - Limited Space",
            Status::Moderate => "MODERATE - Some Space",
            Status::Available => "AVAILABLE - Plenty of Space",
        }
    }
}

pub fn status_emoji(percentage: f64) -> &'static str {
    Status::from_percentage(percentage).emoji()
}

pub fn status_text(percentage: f64) -> &'static str {
    Status::from_percentage(percentage).text()
}

/// Bar color: red when full, yellow from 75%, green below.
pub fn bar_color(percentage: f64) -> Color {
    if percentage >= 100.0 {
        Color::Red
    } else if percentage >= 75.0 {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// Number of solid cells for `percentage`, kept within the bar.
pub fn filled_cells(percentage: f64) -> usize {
    let filled = (BAR_WIDTH as f64 * percentage / 100.0).floor();
    filled.clamp(0.0, BAR_WIDTH as f64) as usize
}

pub fn progress_bar(percentage: f64) -> String {
    let filled = filled_cells(percentage);
    format!(
        "{}{}",
        "█".repeat(filled).with(bar_color(percentage)),
        "░".repeat(BAR_WIDTH - filled).dim()
    )
}

/// Escape sequence that wipes the screen and homes the cursor.
pub fn clear_screen() -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = Clear(ClearType::All).write_ansi(&mut out);
    let _ = MoveTo(0, 0).write_ansi(&mut out);
    out
}

pub fn header() -> String {
    let border = "═".repeat(50);
    let mut out = String::new();
    let _ = write!(out, "{}{NL}", format!("╔{border}╗").cyan().bold());
    let _ = write!(
        out,
        "{}{}{}{NL}",
        "║".cyan().bold(),
        "          🏋️  EVO FITNESS GYM CHECKER 🏋️          ".bold(),
        "║".cyan().bold()
    );
    let _ = write!(out, "{}{NL}{NL}", format!("╚{border}╝").cyan().bold());
    out
}

/// Full-screen occupancy frame for one reading.
pub fn render_occupancy_frame(location: &Location, reading: &OccupancyReading) -> String {
    let percentage = reading.percentage_used;
    let status = Status::from_percentage(percentage);

    let mut out = clear_screen();
    out.push_str(&header());
    let _ = write!(
        out,
        "  {} {}{NL}{NL}",
        "Location:".bold(),
        location.name.as_str().cyan().bold()
    );
    let _ = write!(
        out,
        "  {}  {}{NL}",
        "People Now:".bold(),
        reading.current.to_string().white().bold()
    );
    let _ = write!(
        out,
        "  {}    {}{NL}{NL}",
        "Capacity:".bold(),
        format!("{percentage}%").white().bold()
    );
    let _ = write!(out, "  [{}]{NL}{NL}", progress_bar(percentage));
    let _ = write!(
        out,
        "  {}{NL}{NL}",
        format!("Status: {} {}", status.emoji(), status.text()).bold()
    );
    let _ = write!(out, "{}{NL}{NL}", "─".repeat(RULE_WIDTH).dim());
    let _ = write!(out, "  {}{NL}{NL}", COMMAND_HINT.dim());
    out
}

/// Case-insensitive substring match on location names, preserving order.
pub fn filter_locations<'a>(locations: &'a [Location], search_term: &str) -> Vec<&'a Location> {
    let needle = search_term.to_lowercase();
    locations
        .iter()
        .filter(|loc| loc.name.to_lowercase().contains(&needle))
        .collect()
}

/// Picker screen. Returns the frame together with the matches it lists so
/// the caller can map a typed number back to a location.
pub fn render_location_list<'a>(
    locations: &'a [Location],
    search_term: &str,
) -> (String, Vec<&'a Location>) {
    let filtered = filter_locations(locations, search_term);

    let mut out = clear_screen();
    out.push_str(&header());
    let _ = write!(out, "{}{NL}{NL}", "  Select a location:".bold());

    if filtered.is_empty() {
        let _ = write!(
            out,
            "{}{NL}{NL}",
            format!("  No locations found matching \"{search_term}\"").yellow()
        );
    } else {
        for (idx, loc) in filtered.iter().enumerate() {
            let _ = write!(out, "  {} {}{NL}", format!("{}.", idx + 1).cyan(), loc.name);
        }
        out.push_str(NL);
    }

    if !search_term.is_empty() {
        let _ = write!(
            out,
            "{}{NL}",
            format!("  Searching for: \"{search_term}\"").dim()
        );
    }

    (out, filtered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(id: &str, name: &str) -> Location {
        Location {
            id: id.into(),
            name: name.into(),
        }
    }

    #[test]
    fn filled_cells_follow_floor_rule() {
        assert_eq!(filled_cells(0.0), 0);
        assert_eq!(filled_cells(3.0), 0);
        assert_eq!(filled_cells(10.0), 3);
        assert_eq!(filled_cells(49.0), 14);
        assert_eq!(filled_cells(80.0), 24);
        assert_eq!(filled_cells(99.9), 29);
        assert_eq!(filled_cells(100.0), 30);
    }

    #[test]
    fn filled_cells_stay_inside_bar() {
        assert_eq!(filled_cells(150.0), BAR_WIDTH);
        assert_eq!(filled_cells(-5.0), 0);
        let bar = progress_bar(150.0);
        assert_eq!(bar.matches('█').count(), BAR_WIDTH);
        assert_eq!(bar.matches('░').count(), 0);
    }

    #[test]
    fn bar_has_thirty_cells() {
        for p in [0.0, 33.0, 74.0, 75.0, 100.0] {
            let bar = progress_bar(p);
            let cells = bar.matches('█').count() + bar.matches('░').count();
            assert_eq!(cells, BAR_WIDTH, "percentage {p}");
        }
    }

    #[test]
    fn bar_color_thresholds() {
        assert_eq!(bar_color(0.0), Color::Green);
        assert_eq!(bar_color(74.9), Color::Green);
        assert_eq!(bar_color(75.0), Color::Yellow);
        assert_eq!(bar_color(99.0), Color::Yellow);
        assert_eq!(bar_color(100.0), Color::Red);
        assert_eq!(bar_color(150.0), Color::Red);
    }

    #[test]
    fn status_text_boundaries() {
        let cases = [
            (0.0, "AVAILABLE - Plenty of Space"),
            (49.0, "AVAILABLE - Plenty of Space"),
            (50.0, "MODERATE - Some Space"),
            (74.0, "MODERATE - Some Space"),
            (75.0, "BUSY - Limited Space"),
            (99.0, "BUSY - Limited Space"),
            (100.0, "FULL - Very Busy"),
            (150.0, "FULL - Very Busy"),
        ];
        for (p, expected) in cases {
            assert_eq!(status_text(p), expected, "percentage {p}");
        }
    }

    #[test]
    fn status_emoji_boundaries() {
        assert_eq!(status_emoji(10.0), "🟢");
        assert_eq!(status_emoji(50.0), "🟠");
        assert_eq!(status_emoji(75.0), "🟡");
        assert_eq!(status_emoji(100.0), "🔴");
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let locations = vec![loc("1", "Oslo Gym"), loc("2", "Bergen Gym")];

        let hits = filter_locations(&locations, "oslo");
        assert_eq!(hits, vec![&locations[0]]);

        let hits = filter_locations(&locations, "");
        assert_eq!(hits, vec![&locations[0], &locations[1]]);

        let hits = filter_locations(&locations, "GYM");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn filter_handles_norwegian_letters() {
        let locations = vec![loc("1", "Tromsø Sentrum"), loc("2", "Ålesund")];
        assert_eq!(filter_locations(&locations, "TROMSØ"), vec![&locations[0]]);
        assert_eq!(filter_locations(&locations, "å"), vec![&locations[1]]);
    }

    #[test]
    fn location_list_numbers_matches_from_one() {
        let locations = vec![loc("1", "Oslo Gym"), loc("2", "Bergen Gym")];
        let (frame, filtered) = render_location_list(&locations, "");
        assert_eq!(filtered.len(), 2);
        assert!(frame.contains("Select a location:"));
        assert!(frame.contains("1."));
        assert!(frame.contains("Bergen Gym"));
        assert!(!frame.contains("Searching for"));
    }

    #[test]
    fn location_list_reports_no_matches_and_echoes_term() {
        let locations = vec![loc("1", "Oslo Gym")];
        let (frame, filtered) = render_location_list(&locations, "xyz");
        assert!(filtered.is_empty());
        assert!(frame.contains("No locations found matching \"xyz\""));
        assert!(frame.contains("Searching for: \"xyz\""));
    }

    #[test]
    fn occupancy_frame_shows_busy_reading() {
        let location = loc("a", "Oslo");
        let reading = OccupancyReading {
            current: 40,
            percentage_used: 80.0,
        };
        let frame = render_occupancy_frame(&location, &reading);

        assert!(frame.starts_with(&clear_screen()));
        assert!(frame.contains("Oslo"));
        assert!(frame.contains("40"));
        assert!(frame.contains("80%"));
        assert!(frame.contains("BUSY - Limited Space"));
        assert!(frame.contains(COMMAND_HINT));
        assert_eq!(frame.matches('█').count(), 24);
        assert_eq!(frame.matches('░').count(), 6);
        assert_eq!(bar_color(reading.percentage_used), Color::Yellow);
        assert!(frame.contains(&progress_bar(80.0)));
    }
}
