//! Default configuration values

/// Recognized source file extensions for build unit discovery
pub const SOURCE_EXTENSIONS: &[&str] = &["c", "cpp", "S"];

/// Default CPU frequency in Hz when the board profile omits one
pub const DEFAULT_F_CPU: u32 = 400_000_000;

/// Default flash size when the board profile omits one
pub const DEFAULT_FLASH_SIZE: &str = "16MB";

/// Default upload baud rate
pub const DEFAULT_BAUD: u32 = 460_800;

/// Default external flashing tool
pub const DEFAULT_FLASH_TOOL: &str = "esptool.py";

/// Exit code reported when the flashing tool cannot be launched
pub const TOOL_NOT_FOUND_EXIT_CODE: i32 = 127;

/// Default framework sources directory
pub const DEFAULT_FRAMEWORK_DIR: &str = "framework";

/// Default framework core name under `cores/`
pub const DEFAULT_CORE_NAME: &str = "esp32";

/// Default build output root, relative to the project root
pub const DEFAULT_BUILD_DIR: &str = ".build";

/// Default build environment name
pub const DEFAULT_ENVIRONMENT: &str = "default";

/// Arduino API level define value
pub const ARDUINO_API_LEVEL: u32 = 10812;

/// ESP-IDF version marker define value
pub const IDF_VERSION: &str = "v5.3-dev";
