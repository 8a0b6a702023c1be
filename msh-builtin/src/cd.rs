use super::ShellProxy;
use msh_types::{Context, Status};
use std::env;
use tracing::{debug, warn};

/// Directory a bare `cd` lands in.
pub fn home_dir() -> String {
    match env::var("HOME") {
        Ok(home) if !home.is_empty() => home,
        _ => {
            warn!("HOME is not set, falling back to the platform home directory");
            dirs::home_dir()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_else(|| String::from("/"))
        }
    }
}

pub fn command(ctx: &Context, argv: Vec<String>, proxy: &mut dyn ShellProxy) -> Status {
    let dir = match argv.get(1).map(|s| s.as_str()) {
        Some(dir) if dir.starts_with('~') => shellexpand::tilde(dir).to_string(),
        Some(dir) => dir.to_string(),
        None => home_dir(),
    };

    debug!("cd to {}", dir);
    match proxy.changepwd(&dir) {
        Ok(_) => Status::success(),
        Err(err) => {
            ctx.write_stdout(&format!("cd: {}: {}", dir, err)).ok();
            Status::failure()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockProxy, run};

    #[test]
    fn bare_cd_goes_home() {
        let mut proxy = MockProxy::default();
        let home = home_dir();
        let (status, out) = run(command, &["cd"], &mut proxy);

        if std::path::Path::new(&home).is_dir() {
            assert!(status.is_success());
            assert_eq!(proxy.pwd.as_deref(), Some(home.as_str()));
            assert!(out.is_empty());
        }
    }

    #[test]
    fn cd_into_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_string_lossy().into_owned();
        let mut proxy = MockProxy::default();

        let (status, out) = run(command, &["cd", &path], &mut proxy);

        assert!(status.is_success());
        assert_eq!(proxy.pwd, Some(path));
        assert!(out.is_empty());
    }

    #[test]
    fn cd_into_missing_directory_reports_and_stays() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope").to_string_lossy().into_owned();
        let mut proxy = MockProxy::default();

        let (status, out) = run(command, &["cd", &missing], &mut proxy);

        assert_eq!(status, Status::failure());
        assert_eq!(proxy.pwd, None);
        assert!(out.starts_with(&format!("cd: {missing}: ")));
        assert!(out.ends_with('\n'));
    }
}
