//! Saved-search criteria codec.
//!
//! Converts between UI form fields and the search API's tagged wire payload
//! (`SW=value~`, `IE=id~`, `IN=choice~`), builds default and filtered search
//! requests, and restores saved searches from API responses.

pub mod cli;
pub mod codec;
pub mod ext;
pub mod identity;
pub mod kind;
pub mod mapper;
pub mod mapping;
pub mod model;
pub mod params;
pub mod restore;
pub mod summary;
pub mod transport;
pub mod util;
pub mod validation;
pub mod window;

pub use codec::Tag;
pub use kind::SearchKind;
pub use mapper::{to_form_fields, to_payload};
pub use model::{EncodedPayload, FieldValue, FormFields, Location};
pub use params::{build_filtered_params, default_params, ReportFilters};
pub use restore::{restore_many, restore_saved_search, RestoredSearch};
pub use summary::{summarize, SearchSummary};
