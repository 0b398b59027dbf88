// Constants for the interpreter

/// Method that signals an `AutoResetEvent` variable
pub const EVENT_SET_METHOD: &str = "Set";
