#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PartitionMethod {
    Range,
    RangeColumns,
    List,
    ListColumns,
    Hash,
    Key,
    LinearHash,
    LinearKey,
    SystemTime,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Partition {
    pub name: String,
    /// `VALUES LESS THAN (...)`, `VALUES IN (...)`, or empty for HASH/KEY
    /// partitions, which have no value clause.
    pub value_clause: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Partitioning {
    pub method: PartitionMethod,
    /// The partitioning expression (`HASH`/`RANGE`/`LIST`) or a comma-joined
    /// column list (`RANGE COLUMNS`/`LIST COLUMNS`/`KEY`).
    pub expression: String,
    pub sub_partitioning: Option<Box<Partitioning>>,
    pub partitions: Vec<Partition>,
}

impl Partitioning {
    /// Same method/expression/sub-partitioning/partition set; used to
    /// decide between `ModifyPartitions` (partitions changed, scheme
    /// intact) and `PartitionBy` (scheme replaced outright).
    pub fn same_scheme(&self, other: &Partitioning) -> bool {
        self.method == other.method
            && self.expression == other.expression
            && self.sub_partitioning == other.sub_partitioning
    }
}
