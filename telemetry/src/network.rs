use core::fmt::Debug;
use core::net::Ipv4Addr;

/// Station-mode network interface.
pub trait Network {
    type Error: Debug;

    /// Start associating with the configured access point. Does not wait for
    /// the association to complete.
    async fn begin(&mut self) -> Result<(), Self::Error>;

    /// Associated and holding an IPv4 address.
    fn is_connected(&self) -> bool;

    fn local_ip(&self) -> Option<Ipv4Addr>;
}
