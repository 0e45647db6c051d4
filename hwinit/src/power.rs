//! Platform power control.

/// Power-off through the PMIC.
pub trait PowerControl {
    /// Cut power to the whole platform.
    ///
    /// On hardware this does not come back; implementations used on a host
    /// simply record the request and return.
    fn power_off(&mut self);
}
