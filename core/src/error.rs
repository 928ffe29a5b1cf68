use thiserror::Error;

/// IPAM error types
#[derive(Error, Debug)]
pub enum IpamError {
    /// Malformed pool identifier
    #[error("invalid string form for pool id: {0}")]
    InvalidFormat(String),

    /// Pool is not registered in the address space
    #[error("Pool not found: {space}/{subnet}")]
    PoolNotFound { space: String, subnet: String },

    /// Requested pool overlaps a registered pool
    #[error("Pool overlap: {requested} overlaps {existing} in {space}")]
    PoolOverlap {
        space: String,
        requested: String,
        existing: String,
    },

    /// Child subnet is not contained in the pool or overlaps a sibling
    #[error("Invalid child subnet {child} for pool {pool}: {reason}")]
    InvalidChild {
        pool: String,
        child: String,
        reason: String,
    },

    /// Child subnet is not carved from the pool
    #[error("Child subnet {child} not found in pool {pool}")]
    ChildNotFound { pool: String, child: String },

    /// Address allocation and child allocation requested on the same pool
    #[error("Mixed allocation on pool {pool}: {message}")]
    MixedAllocation { pool: String, message: String },

    /// Pool still holds children or addresses
    #[error("Pool in use: {pool} has {children} child subnet(s) and {addresses} address(es)")]
    PoolInUse {
        pool: String,
        children: usize,
        addresses: u64,
    },

    /// Address is outside the tracked subnet
    #[error("Address {addr} is not in {pool}")]
    AddressOutOfRange { pool: String, addr: String },

    /// Address is already selected
    #[error("Address already in use: {0}")]
    AddressInUse(String),

    /// Address was never selected
    #[error("Address not allocated: {0}")]
    AddressNotSelected(String),

    /// Tracker has no unselected address left
    #[error("No available address in {0}")]
    NoAvailableAddress(String),

    /// No predefined pool has free space
    #[error("No available pool in address space {0}")]
    NoAvailablePool(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for IpamError {
    fn from(err: serde_json::Error) -> Self {
        IpamError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for IpamError {
    fn from(err: serde_yaml::Error) -> Self {
        IpamError::SerializationError(err.to_string())
    }
}

/// Result type alias for IPAM operations
pub type Result<T> = std::result::Result<T, IpamError>;
