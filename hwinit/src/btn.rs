//! Physical buttons.

bitflags::bitflags! {
    /// Buttons currently held down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Buttons: u32 {
        const POWER = 1 << 0;
        const VOL_DOWN = 1 << 1;
        const VOL_UP = 1 << 2;
    }
}

/// Button sampling, provided by the GPIO/PMIC driver.
pub trait ButtonInput {
    /// Sample all buttons once.
    fn read(&mut self) -> Buttons;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_alone_differs_from_combination() {
        let combo = Buttons::POWER | Buttons::VOL_UP;
        assert_ne!(combo, Buttons::POWER);
        assert!(combo.contains(Buttons::POWER));
        assert_eq!(Buttons::from_bits_truncate(1), Buttons::POWER);
    }
}
