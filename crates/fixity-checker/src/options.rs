use std::time::Duration;

use fixity_verify::DigestAlgorithm;

pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(300);

/// Settings of one fixity run, built once and shared by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Instances checked at the same time. `1` keeps inventory order.
    pub concurrency:  usize,
    /// Limit for each inventory call.
    pub rpc_timeout:  Duration,
    /// Limit for opening a stream and for each read from it.
    pub read_timeout: Duration,
    /// Limit for the whole run. Instances not started in time are skipped.
    pub run_timeout:  Option<Duration>,
    pub buffer_size:  usize,
    pub algorithm:    DigestAlgorithm,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            concurrency:  1,
            rpc_timeout:  DEFAULT_RPC_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            run_timeout:  None,
            buffer_size:  DEFAULT_BUFFER_SIZE,
            algorithm:    DigestAlgorithm::Sha512,
        }
    }
}

impl RunOptions {
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = timeout;
        self
    }

    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn run_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.run_timeout = timeout;
        self
    }

    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    pub fn algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}
