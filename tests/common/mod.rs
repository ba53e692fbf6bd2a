use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Run the binary in `dir` with a controlled environment.
///
/// `HOME`, `GOMODCACHE` and `PWD` are cleared first so the host never leaks into assertions.
#[allow(dead_code)]
pub fn run_in(dir: &Path, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let bin = env!("CARGO_BIN_EXE_go-docker-run");
    let mut cmd = Command::new(bin);
    cmd.current_dir(dir)
        .args(args)
        .env_remove("HOME")
        .env_remove("GOMODCACHE")
        .env_remove("PWD")
        .env("NO_COLOR", "1");
    for (k, v) in envs {
        cmd.env(k, v);
    }
    cmd.output().expect("failed to run go-docker-run")
}

#[allow(dead_code)]
pub fn write_go_mod(dir: &Path, content: &str) {
    std::fs::write(dir.join("go.mod"), content).expect("write go.mod");
}

/// The working directory as the child process will see it.
#[allow(dead_code)]
pub fn canonical(dir: &Path) -> PathBuf {
    dir.canonicalize().expect("canonicalize tempdir")
}

#[allow(dead_code)]
pub fn stdout_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

#[allow(dead_code)]
pub fn describe(out: &Output) -> String {
    format!(
        "status: {:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr)
    )
}
