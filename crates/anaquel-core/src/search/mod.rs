//! Search-index query construction

pub mod query;

pub use query::{
    apply_result_cap, ensure_projection, fallback_suggestion_query, primary_query,
    AUTHOR_BOOST_FIELDS, FALLBACK_SUGGESTION_FIELDS, GENERAL_BOOST_FIELDS, SOURCE_PROJECTION,
};
