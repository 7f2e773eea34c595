// Application layer
// Navigation state, the injected clock and the fetch/rebuild session

pub mod clock;
pub mod navigation;
pub mod session;
pub mod state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use navigation::NavigationStateMachine;
pub use session::{CalendarSession, FetchOutcome};
pub use state::{NavigationState, ProjectFilter, ViewMode};
