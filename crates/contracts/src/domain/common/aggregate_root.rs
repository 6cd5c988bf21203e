/// Storage naming of an aggregate
pub trait AggregateRoot {
    /// Index of the aggregate in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name used for storage (e.g. "bank_slip")
    fn collection_name() -> &'static str;

    /// Full system name, e.g. "a001_bank_slip". Also the table name.
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
