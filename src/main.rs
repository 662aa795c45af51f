use git_password::cli::{self, HelperContext};
use git_password::constants;
use git_password::core::secret_store::KeyringStore;
use git_password::util::caller::ProcessTableVerifier;
use git_password::util::git::GitConfig;
use git_password::util::logging;
use git_password::util::prompt::TerminalPrompter;
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    logging::init();

    let verifier = ProcessTableVerifier::new();
    let repository = GitConfig::new();
    let store = KeyringStore::new();
    let prompter = TerminalPrompter;
    let ctx = HelperContext {
        verifier: &verifier,
        repository: &repository,
        store: &store,
        prompter: &prompter,
    };

    let stdout = std::io::stdout();
    match cli::run(&ctx, std::env::args_os(), &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = writeln!(std::io::stderr(), "{}", cli::fatal_line(&e));
            ExitCode::from(constants::FATAL_EXIT_CODE)
        }
    }
}
