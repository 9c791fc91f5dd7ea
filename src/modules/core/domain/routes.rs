//! Route table of the HTTP gateway

use std::fmt;

/// Routes served by the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Precipitation,
    Stations,
    Tobs,
    Start,
    StartEnd,
}

impl Route {
    /// All routes, in the order they are listed on the home page
    pub fn all() -> &'static [Route] {
        &[
            Route::Home,
            Route::Precipitation,
            Route::Stations,
            Route::Tobs,
            Route::Start,
            Route::StartEnd,
        ]
    }

    /// Axum path pattern
    pub fn pattern(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Precipitation => "/api/v1.0/precipitation",
            Route::Stations => "/api/v1.0/stations",
            Route::Tobs => "/api/v1.0/tobs",
            Route::Start => "/api/v1.0/:start",
            Route::StartEnd => "/api/v1.0/:start/:end",
        }
    }

    /// Path as advertised to humans
    pub fn display_path(&self) -> &'static str {
        match self {
            Route::Start => "/api/v1.0/start-date",
            Route::StartEnd => "/api/v1.0/start-date/end-date",
            other => other.pattern(),
        }
    }

    /// Short description
    pub fn description(&self) -> &'static str {
        match self {
            Route::Home => "List available routes",
            Route::Precipitation => "Precipitation keyed by date (last row per date wins)",
            Route::Stations => "Station names",
            Route::Tobs => "Flat date/temperature list for station USC00519281",
            Route::Start => "Lowest/average/highest temperature from start-date onward",
            Route::StartEnd => "Lowest/average/highest temperature between two dates inclusive",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {}", self.display_path())
    }
}

/// HTML body of the home route
pub fn home_page() -> String {
    let mut body = String::from("Available Routes:<br/>");
    for route in Route::all().iter().filter(|r| **r != Route::Home) {
        body.push_str(route.display_path());
        body.push_str("<br/>");
    }
    body.push_str("Enter dates in 'YYYY-DD-MM' format");
    body
}
