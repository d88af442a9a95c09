use paperdesk::cli::{internal_error, is_user_error, run, user_error};

fn main() {
    env_logger::init();

    #[cfg(windows)]
    let _ = enable_ansi_support::enable_ansi_support();

    if let Err(e) = run() {
        if is_user_error(&e) {
            user_error(&e.to_string());
        }

        // Show error chain if available
        let mut chain = e.chain().skip(1).peekable();
        if chain.peek().is_some() {
            eprintln!("Internal error: {}", e);
            eprintln!("\nCaused by:");
            for (indent, cause) in chain.enumerate() {
                eprintln!("{:indent$}  {}", "", cause, indent = indent + 1);
            }
            std::process::exit(2);
        }
        internal_error(&e.to_string());
    }
}
