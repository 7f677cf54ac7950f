mod cli;

use chatview_core::FetchError;
use chatview_core::interrupt;

fn main() {
    if let Err(e) = cli::run() {
        if e.downcast_ref::<interrupt::InterruptedError>().is_some() {
            std::process::exit(130);
        }
        eprintln!("{e:#}");
        let auth_failure = e.downcast_ref::<FetchError>().is_some_and(FetchError::is_auth);
        std::process::exit(if auth_failure { 2 } else { 1 });
    }
}
