/***************************************/
/*               Macros                */
/***************************************/

/// Unwraps a `Result`, logging the error and terminating the process on `Err`.
#[macro_export]
macro_rules! unwrap_or_exit {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => {
                log::error!("ERROR: {}", e);
                std::process::exit(1);
            }
        }
    };
}
