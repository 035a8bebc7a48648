//! Record trait implemented by everything the store can hold.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A named, serializable record.
///
/// The store keys its collection by [`Record::name`]; names are unique and
/// putting a record under an existing name replaces the previous one.
pub trait Record: Serialize + DeserializeOwned + Clone + Send {
    /// Unique identity of the record within a collection.
    fn name(&self) -> &str;
}
