pub const APP_NAME: &str = "extbuild";

/// Concurrent jobs handed to the toolchain's build step.
pub const DEFAULT_JOBS: u32 = 4;

/// Program used for both toolchain phases unless overridden.
pub const DEFAULT_TOOLCHAIN: &str = "cmake";

/// Cache variable through which the interpreter executable reaches the configure step.
pub const INTERPRETER_VAR: &str = "PYTHON_EXECUTABLE";

pub const ENV_BUILD_BASE: &str = "EXTBUILD_BUILD_BASE";
pub const ENV_BUILD_TEMP: &str = "EXTBUILD_BUILD_TEMP";
pub const ENV_BUILD_LIB: &str = "EXTBUILD_BUILD_LIB";
pub const ENV_TOOLCHAIN: &str = "EXTBUILD_CMAKE";
