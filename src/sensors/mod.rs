mod simulated;
mod sysfs_gpio;

pub use simulated::SimulatedGauge;
pub use sysfs_gpio::{GPIO_ROOT, GpioError, SysfsGpioCounter};
