//! Routes command implementation

use clap::Args;
use climate_api_core::Route;

/// Print every route with a short description
#[derive(Args, Debug)]
pub struct RoutesCommand {}

impl RoutesCommand {
    pub fn execute(&self) {
        for route in Route::all() {
            println!("{:<40} {}", route.to_string(), route.description());
        }
    }
}
