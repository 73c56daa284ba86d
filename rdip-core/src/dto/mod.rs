//! Data Transfer Objects for the analysis service
//!
//! Request bodies and query parameters sent to the service. Constructors
//! validate locally so a malformed request never reaches the network.

pub mod analyze;
pub mod trending;
