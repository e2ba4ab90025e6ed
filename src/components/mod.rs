mod dom;
pub mod policy_map;

pub use dom::EventSubscription;
