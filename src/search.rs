// src/search.rs
//
// Header search box. Matches against a fixed sample roster, not the live
// API data.

use std::time::{Duration, Instant};

use crate::client::widgets::{self, thousands};

pub const MAX_RESULTS: usize = 8;
pub const HIGHLIGHT_FOR: Duration = Duration::from_secs(2);

struct SampleDriver {
    id: &'static str,
    name: &'static str,
    rating: f64,
    rides_completed: u32,
    earnings: f64,
}

struct SampleRide {
    id: &'static str,
    driver: &'static str,
    passenger: &'static str,
    pickup: &'static str,
    destination: &'static str,
    status: &'static str,
    fare: f64,
}

struct SampleLocation {
    name: &'static str,
    rides: u32,
    growth: f64,
}

const DRIVERS: [SampleDriver; 5] = [
    SampleDriver { id: "RC001", name: "Rajesh", rating: 4.8, rides_completed: 256, earnings: 1400.0 },
    SampleDriver { id: "RC002", name: "Amit", rating: 4.6, rides_completed: 234, earnings: 800.0 },
    SampleDriver { id: "RC003", name: "Suresh", rating: 4.9, rides_completed: 289, earnings: 500.0 },
    SampleDriver { id: "RC004", name: "Vikram", rating: 4.7, rides_completed: 198, earnings: 410.0 },
    SampleDriver { id: "RC005", name: "Arjun", rating: 4.5, rides_completed: 167, earnings: 350.0 },
];

const RIDES: [SampleRide; 3] = [
    SampleRide {
        id: "RC001",
        driver: "Rajesh",
        passenger: "Priya",
        pickup: "Sathvacheri",
        destination: "Kaspa",
        status: "enroute",
        fare: 450.0,
    },
    SampleRide {
        id: "RC002",
        driver: "Amit",
        passenger: "Neha",
        pickup: "Katpadi Railway Station",
        destination: "VIT",
        status: "pickup",
        fare: 280.0,
    },
    SampleRide {
        id: "RC003",
        driver: "Suresh",
        passenger: "Kavya",
        pickup: "New Busstand",
        destination: "Vellore Fort",
        status: "arrived",
        fare: 180.0,
    },
];

const LOCATIONS: [SampleLocation; 8] = [
    SampleLocation { name: "VIT UNIVERSITY", rides: 456, growth: 12.5 },
    SampleLocation { name: "VELLORE Airport", rides: 342, growth: 8.2 },
    SampleLocation { name: "CMC HOSPITAL", rides: 289, growth: -2.1 },
    SampleLocation { name: "VELLORE FORT", rides: 234, growth: 15.8 },
    SampleLocation { name: "PERIYAR PARK", rides: 187, growth: 6.4 },
    SampleLocation { name: "KATPADI RAILWAY STATION", rides: 145, growth: 3.2 },
    SampleLocation { name: "GOLDEN TEMPLE", rides: 98, growth: 4.7 },
    SampleLocation { name: "NEW BUS STAND", rides: 76, growth: 22.1 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Driver,
    Ride,
    Location,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Driver => "Driver",
            Category::Ride => "Live Ride",
            Category::Location => "Location",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub category: Category,
    /// Dashboard section to scroll to.
    pub anchor: &'static str,
}

/// Case-insensitive substring search: drivers, then rides, then locations,
/// at most `MAX_RESULTS`. A blank query matches nothing.
pub fn search(query: &str) -> Vec<SearchResult> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let q = query.to_lowercase();

    let drivers = DRIVERS
        .iter()
        .filter(|d| d.name.to_lowercase().contains(&q) || d.id.to_lowercase().contains(&q))
        .map(|d| SearchResult {
            id: format!("driver-{}", d.id),
            title: d.name.to_string(),
            subtitle: format!(
                "{} • ⭐ {} • {} rides • ₹{}",
                d.id, d.rating, d.rides_completed, thousands(d.earnings)
            ),
            category: Category::Driver,
            anchor: widgets::DRIVERS.anchor,
        });

    let rides = RIDES
        .iter()
        .filter(|r| {
            format!("{} {} {} {} {}", r.driver, r.passenger, r.pickup, r.destination, r.id)
                .to_lowercase()
                .contains(&q)
        })
        .map(|r| SearchResult {
            id: format!("ride-{}", r.id),
            title: format!("{} → {}", r.pickup, r.destination),
            subtitle: format!(
                "Driver: {} • Passenger: {} • ₹{} • {}",
                r.driver, r.passenger, r.fare, r.status
            ),
            category: Category::Ride,
            anchor: widgets::LIVE_RIDES.anchor,
        });

    let locations = LOCATIONS
        .iter()
        .filter(|l| l.name.to_lowercase().contains(&q))
        .map(|l| SearchResult {
            id: format!("location-{}", l.name),
            title: l.name.to_string(),
            subtitle: format!(
                "{} rides • {}{:.1}% growth",
                l.rides,
                if l.growth >= 0.0 { "+" } else { "" },
                l.growth
            ),
            category: Category::Location,
            anchor: widgets::LOCATIONS.anchor,
        });

    drivers.chain(rides).chain(locations).take(MAX_RESULTS).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
}

/// Transient ring around a dashboard section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub anchor: &'static str,
    pub until: Instant,
}

impl Highlight {
    pub fn is_active(&self, now: Instant) -> bool {
        now < self.until
    }
}

/// Search box state: the query, its results, whether the list is open and
/// which row the keyboard cursor is on.
#[derive(Debug, Clone, Default)]
pub struct SearchBox {
    query: String,
    results: Vec<SearchResult>,
    open: bool,
    selected: Option<usize>,
}

impl SearchBox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.results = search(&self.query);
        self.selected = None;
        self.open = !self.results.is_empty();
    }

    /// Re-opens the list on focus if the current query has results.
    pub fn focus(&mut self) {
        if !self.query.trim().is_empty() && !self.results.is_empty() {
            self.open = true;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Keyboard handling; `Enter` on a highlighted row selects it.
    pub fn key(&mut self, key: Key, now: Instant) -> Option<Highlight> {
        if !self.open {
            return None;
        }
        match key {
            Key::ArrowDown => {
                let last = self.results.len().saturating_sub(1);
                self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(last)));
                None
            }
            Key::ArrowUp => {
                self.selected = self.selected.and_then(|i| i.checked_sub(1));
                None
            }
            Key::Enter => self.selected.and_then(|i| self.select(i, now)),
            Key::Escape => {
                self.open = false;
                self.selected = None;
                None
            }
        }
    }

    /// Picks a result: the box shows its title, closes, and the matching
    /// dashboard section is highlighted for `HIGHLIGHT_FOR`.
    pub fn select(&mut self, index: usize, now: Instant) -> Option<Highlight> {
        let result = self.results.get(index)?.clone();
        self.query = result.title;
        self.open = false;
        self.selected = None;
        Some(Highlight { anchor: result.anchor, until: now + HIGHLIGHT_FOR })
    }
}

/// One line typed at the dashboard's search prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Query(String),
    Key(Key),
    Focus,
}

/// `:down`, `:up`, `:enter`, `:esc` and `:focus` drive the box; anything
/// else replaces the query.
pub fn parse_input(line: &str) -> Input {
    match line.trim() {
        ":down" => Input::Key(Key::ArrowDown),
        ":up" => Input::Key(Key::ArrowUp),
        ":enter" => Input::Key(Key::Enter),
        ":esc" => Input::Key(Key::Escape),
        ":focus" => Input::Focus,
        _ => Input::Query(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

impl SearchBox {
    /// Applies one input line. Returns the section to highlight, if any.
    pub fn apply(&mut self, input: Input, now: Instant) -> Option<Highlight> {
        match input {
            Input::Query(q) => {
                self.set_query(q);
                None
            }
            Input::Key(key) => self.key(key, now),
            Input::Focus => {
                self.focus();
                None
            }
        }
    }

    /// The open result list, cursor row marked with `>`.
    pub fn render(&self) -> Vec<String> {
        if !self.open {
            return Vec::new();
        }
        self.results
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let cursor = if self.selected == Some(i) { '>' } else { ' ' };
                format!("{cursor} [{}] {} | {}", r.category.label(), r.title, r.subtitle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vit_finds_the_ride_and_the_campus() {
        let results = search("VIT");
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["ride-RC002", "location-VIT UNIVERSITY"]);
        assert_eq!(search("vit"), results);
    }

    #[test]
    fn every_hit_contains_the_query() {
        for q in ["vit", "ra", "FORT", "rc00"] {
            for r in search(q) {
                let haystack = format!("{} {} {}", r.id, r.title, r.subtitle).to_lowercase();
                assert!(haystack.contains(&q.to_lowercase()), "{q} -> {}", r.id);
            }
        }
    }

    #[test]
    fn results_are_capped_in_category_order() {
        // every driver and ride id contains "r"
        let results = search("r");
        assert_eq!(results.len(), MAX_RESULTS);
        assert!(results[..5].iter().all(|r| r.category == Category::Driver));
        assert!(results[5..].iter().all(|r| r.category == Category::Ride));
    }

    #[test]
    fn blank_queries_match_nothing() {
        assert!(search("").is_empty());
        assert!(search("   ").is_empty());
        assert!(search("zzz").is_empty());
    }

    #[test]
    fn result_text() {
        let driver = &search("rajesh")[0];
        assert_eq!(driver.title, "Rajesh");
        assert_eq!(driver.subtitle, "RC001 • ⭐ 4.8 • 256 rides • ₹1,400");
        assert_eq!(driver.anchor, "drivers");

        let cmc = &search("cmc")[0];
        assert_eq!(cmc.subtitle, "289 rides • -2.1% growth");
        assert_eq!(cmc.category.label(), "Location");

        let ride = search("kavya").remove(0);
        assert_eq!(ride.title, "New Busstand → Vellore Fort");
        assert_eq!(ride.anchor, "live-rides");
    }

    #[test]
    fn keyboard_navigation_and_selection() {
        let now = Instant::now();
        let mut sb = SearchBox::new();
        sb.set_query("vellore");
        assert!(sb.is_open());
        let n = sb.results().len();
        assert!(n >= 2);

        assert_eq!(sb.key(Key::ArrowUp, now), None);
        assert_eq!(sb.selected(), None);
        for _ in 0..n + 3 {
            sb.key(Key::ArrowDown, now);
        }
        assert_eq!(sb.selected(), Some(n - 1));
        sb.key(Key::ArrowUp, now);
        assert_eq!(sb.selected(), Some(n - 2));

        let title = sb.results()[n - 2].title.clone();
        let highlight = sb.key(Key::Enter, now).unwrap();
        assert_eq!(sb.query(), title);
        assert!(!sb.is_open());
        assert!(highlight.is_active(now + Duration::from_millis(1999)));
        assert!(!highlight.is_active(now + HIGHLIGHT_FOR));
    }

    #[test]
    fn enter_without_cursor_and_escape() {
        let now = Instant::now();
        let mut sb = SearchBox::new();
        sb.set_query("amit");
        assert_eq!(sb.key(Key::Enter, now), None);
        assert!(sb.is_open());

        sb.key(Key::Escape, now);
        assert!(!sb.is_open());
        assert_eq!(sb.key(Key::ArrowDown, now), None);
        assert_eq!(sb.selected(), None);

        sb.focus();
        assert!(sb.is_open());
    }

    #[test]
    fn prompt_lines_parse() {
        assert_eq!(parse_input(":down\n"), Input::Key(Key::ArrowDown));
        assert_eq!(parse_input(" :esc "), Input::Key(Key::Escape));
        assert_eq!(parse_input(":focus"), Input::Focus);
        assert_eq!(parse_input("katpadi\r\n"), Input::Query("katpadi".into()));
    }

    #[test]
    fn prompt_session_selects_and_highlights() {
        let now = Instant::now();
        let mut sb = SearchBox::new();
        assert_eq!(sb.apply(parse_input("suresh"), now), None);
        assert_eq!(sb.render().len(), sb.results().len());
        assert!(sb.render()[0].starts_with("  [Driver] Suresh | RC003"));

        sb.apply(parse_input(":down"), now);
        assert!(sb.render()[0].starts_with("> [Driver] Suresh"));

        let highlight = sb.apply(parse_input(":enter"), now).unwrap();
        assert_eq!(highlight.anchor, "drivers");
        assert_eq!(sb.query(), "Suresh");
        assert!(sb.render().is_empty());
    }
}
