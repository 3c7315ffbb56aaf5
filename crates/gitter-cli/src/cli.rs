use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gitter", about = "Gitter: a minimal content-addressed version control system", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an empty repository
    Init(InitArgs),
    /// Stage files for the next commit
    Add(AddArgs),
    /// Record staged changes
    Commit(CommitArgs),
    /// Show staged, modified and untracked files
    Status(StatusArgs),
    /// Show working-tree changes against HEAD
    Diff(DiffArgs),
    /// Show commit history
    Log(LogArgs),
    /// Check commit names, parent links and the audit log
    Verify(VerifyArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to the current directory)
    pub path: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Files or glob patterns
    #[arg(required = true)]
    pub paths: Vec<String>,
}

#[derive(Args)]
pub struct CommitArgs {
    #[arg(short, long)]
    pub message: String,
    /// Restage every tracked file before committing
    #[arg(short, long)]
    pub all: bool,
}

#[derive(Args)]
pub struct StatusArgs {}

#[derive(Args)]
pub struct DiffArgs {
    /// Limit the diff to a file or directory
    pub path: Option<String>,
}

#[derive(Args)]
pub struct LogArgs {}

#[derive(Args)]
pub struct VerifyArgs {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_init() {
        let cli = Cli::try_parse_from(["gitter", "init"]).unwrap();
        if let Command::Init(args) = cli.command {
            assert_eq!(args.path, None);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_init_with_path() {
        let cli = Cli::try_parse_from(["gitter", "init", "/tmp/repo"]).unwrap();
        if let Command::Init(args) = cli.command {
            assert_eq!(args.path, Some("/tmp/repo".into()));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_add_many() {
        let cli = Cli::try_parse_from(["gitter", "add", "a.txt", "*.rs"]).unwrap();
        if let Command::Add(args) = cli.command {
            assert_eq!(args.paths, vec!["a.txt", "*.rs"]);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn add_requires_a_path() {
        assert!(Cli::try_parse_from(["gitter", "add"]).is_err());
    }

    #[test]
    fn parse_commit() {
        let cli = Cli::try_parse_from(["gitter", "commit", "-m", "hello"]).unwrap();
        if let Command::Commit(args) = cli.command {
            assert_eq!(args.message, "hello");
            assert!(!args.all);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_commit_all() {
        let cli = Cli::try_parse_from(["gitter", "commit", "-a", "--message", "wip"]).unwrap();
        if let Command::Commit(args) = cli.command {
            assert!(args.all);
            assert_eq!(args.message, "wip");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn commit_requires_message() {
        assert!(Cli::try_parse_from(["gitter", "commit"]).is_err());
    }

    #[test]
    fn parse_diff_path() {
        let cli = Cli::try_parse_from(["gitter", "diff", "src"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert_eq!(args.path, Some("src".into()));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_status_log_verify() {
        let status = Cli::try_parse_from(["gitter", "status"]).unwrap();
        assert!(matches!(status.command, Command::Status(_)));
        let log = Cli::try_parse_from(["gitter", "log"]).unwrap();
        assert!(matches!(log.command, Command::Log(_)));
        let verify = Cli::try_parse_from(["gitter", "verify"]).unwrap();
        assert!(matches!(verify.command, Command::Verify(_)));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["gitter", "status", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }
}
