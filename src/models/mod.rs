pub mod itinerary;
pub mod poi;
pub mod request;

pub use itinerary::{Itinerary, ItineraryDay, ScheduledStop};
pub use poi::{Pace, PaceKey, Poi, PoiClass, parse_opening_hours};
pub use request::{
	CallerContext, DayConstraints, GenerateOverrides, ParsedRequest, TravelStyle, UserPreferences,
};
