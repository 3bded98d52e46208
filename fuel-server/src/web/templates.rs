//! Askama templates for the web frontend.

use askama::Template;

use crate::planner::{RefuelPlan, RefuelStop, RouteLeg};
use crate::routing::Route;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the trip form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Vehicle range shown next to the form.
    pub max_range_miles: String,
    pub miles_per_gallon: String,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Plan results fragment.
#[derive(Template)]
#[template(path = "plan_results.html")]
pub struct PlanResultsTemplate {
    pub plan: PlanView,
}

/// Error fragment, shown in place of results.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A planned trip, pre-formatted for display.
#[derive(Debug, Clone)]
pub struct PlanView {
    pub origin: String,
    pub destination: String,
    pub total_distance: String,
    pub total_gallons: String,
    pub total_cost: String,
    pub stations_considered: usize,
    pub stops: Vec<StopView>,
    pub legs: Vec<LegView>,
}

impl PlanView {
    pub fn from_plan(route: &Route, plan: &RefuelPlan) -> Self {
        Self {
            origin: title_case(&route.origin),
            destination: title_case(&route.destination),
            total_distance: format!("{:.1}", plan.total_distance_miles),
            total_gallons: format!("{:.1}", plan.total_gallons),
            total_cost: format_dollars(plan.total_cost_cents()),
            stations_considered: plan.stations_considered,
            stops: plan
                .stops
                .iter()
                .enumerate()
                .map(|(i, s)| StopView::from_stop(i + 1, s))
                .collect(),
            legs: plan.legs.iter().map(LegView::from_leg).collect(),
        }
    }

    pub fn has_stops(&self) -> bool {
        !self.stops.is_empty()
    }
}

/// A fuel stop for display.
#[derive(Debug, Clone)]
pub struct StopView {
    pub number: usize,
    pub name: String,
    pub address: String,
    pub locality: String,
    pub mile_marker: String,
    pub price: String,
    pub gallons: String,
    pub cost: String,
    /// Shown only when the station is noticeably off the route.
    pub detour: Option<String>,
}

impl StopView {
    pub fn from_stop(number: usize, stop: &RefuelStop) -> Self {
        Self {
            number,
            name: stop.station.name.clone(),
            address: stop.station.address.clone(),
            locality: stop.station.locality(),
            mile_marker: format!("{:.1}", stop.mile_marker),
            price: format!("${:.3}", stop.price_per_gallon()),
            gallons: format!("{:.1}", stop.gallons),
            cost: format_dollars((stop.cost_dollars * 100.0).round() as i64),
            detour: (stop.offset_miles >= 0.1).then(|| format!("{:.1} mi off route", stop.offset_miles)),
        }
    }
}

/// A driving leg for display.
#[derive(Debug, Clone)]
pub struct LegView {
    pub from_miles: String,
    pub to_miles: String,
    pub distance: String,
    pub gallons_used: String,
}

impl LegView {
    pub fn from_leg(leg: &RouteLeg) -> Self {
        Self {
            from_miles: format!("{:.1}", leg.from_miles),
            to_miles: format!("{:.1}", leg.to_miles),
            distance: format!("{:.1}", leg.distance_miles),
            gallons_used: format!("{:.1}", leg.gallons_used),
        }
    }
}

/// "$1,234.56" from a cent amount.
pub fn format_dollars(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// "new york, ny" → "New York, NY": two-letter trailing parts are treated
/// as state codes.
fn title_case(place: &str) -> String {
    place
        .split(", ")
        .enumerate()
        .map(|(i, part)| {
            if i > 0 && part.len() == 2 {
                return part.to_uppercase();
            }
            part.split(' ')
                .map(|word| {
                    let mut chars = word.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect(),
                        None => String::new(),
                    }
                })
                .collect::<Vec<String>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollars() {
        assert_eq!(format_dollars(0), "$0.00");
        assert_eq!(format_dollars(13000), "$130.00");
        assert_eq!(format_dollars(123_456_789), "$1,234,567.89");
        assert_eq!(format_dollars(100_000), "$1,000.00");
        assert_eq!(format_dollars(-5), "-$0.05");
    }

    #[test]
    fn place_title_case() {
        assert_eq!(title_case("new york, ny"), "New York, NY");
        assert_eq!(title_case("salt lake city"), "Salt Lake City");
        assert_eq!(title_case("st. louis, mo"), "St. Louis, MO");
    }

    #[test]
    fn render_results_fragment() {
        let plan = PlanView {
            origin: "Chicago, IL".into(),
            destination: "Denver, CO".into(),
            total_distance: "1003.0".into(),
            total_gallons: "100.3".into(),
            total_cost: "$341.02".into(),
            stations_considered: 12,
            stops: vec![StopView {
                number: 1,
                name: "Pilot <Travel> Center".into(),
                address: "I-80 Exit 1".into(),
                locality: "Lincoln, NE".into(),
                mile_marker: "480.0".into(),
                price: "$3.199".into(),
                gallons: "48.0".into(),
                cost: "$153.55".into(),
                detour: None,
            }],
            legs: vec![],
        };

        let html = PlanResultsTemplate { plan }.render().unwrap();
        assert!(html.contains("Chicago, IL"));
        assert!(html.contains("$341.02"));
        // Autoescaped.
        assert!(html.contains("Pilot &lt;Travel&gt; Center"));
    }

    #[test]
    fn render_error_fragment() {
        let html = ErrorTemplate {
            title: "No route".into(),
            message: "gap of 612.0 mi".into(),
        }
        .render()
        .unwrap();
        assert!(html.contains("<h2>No route</h2>"));
        assert!(!html.contains("<html"));
    }

    #[test]
    fn render_no_stops() {
        let plan = PlanView {
            origin: "A".into(),
            destination: "B".into(),
            total_distance: "120.0".into(),
            total_gallons: "0.0".into(),
            total_cost: "$0.00".into(),
            stations_considered: 0,
            stops: vec![],
            legs: vec![],
        };
        let html = PlanResultsTemplate { plan }.render().unwrap();
        assert!(html.contains("No fuel stops needed"));
    }
}
