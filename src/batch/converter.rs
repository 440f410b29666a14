//! # 外部转换器调用
//!
//! 每个文件调用一次 ImageMagick，带固定超时。
//!
//! ## 参数格式
//! ```text
//! magick <src> -blur 0x1.0 [-filter Lanczos] <N>x<N>> -define dds:compression=auto <dst>
//! ```
//! 法线贴图不加 `-filter Lanczos`，避免重采样扭曲法线方向。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - unix 上使用 `nix` 向整个进程组发送信号

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// 诊断信息保留的最大字符数
const DIAGNOSTIC_LIMIT: usize = 200;

/// 轮询子进程状态的间隔
const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// 单个文件的转换结果
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    /// 退出码为 0
    Success { elapsed: Duration },
    /// 非零退出码，附带 stderr 的前 200 个字符
    Failed { diagnostic: String, elapsed: Duration },
    /// 超时，子进程已被终止
    TimedOut { elapsed: Duration },
    /// 无法启动或等待子进程
    Exception { message: String },
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ConversionOutcome::Success { .. })
    }
}

/// ImageMagick 调用器
#[derive(Debug, Clone)]
pub struct Converter {
    executable: PathBuf,
    resolution: u32,
    timeout: Duration,
}

impl Converter {
    pub fn new(executable: PathBuf, resolution: u32, timeout: Duration) -> Self {
        Self {
            executable,
            resolution,
            timeout,
        }
    }

    /// 构建命令行参数（不含可执行文件本身）
    pub fn args(&self, source: &Path, destination: &Path, is_normal: bool) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![source.into(), "-blur".into(), "0x1.0".into()];
        if !is_normal {
            args.push("-filter".into());
            args.push("Lanczos".into());
        }
        args.push(format!("{0}x{0}>", self.resolution).into());
        args.push("-define".into());
        args.push("dds:compression=auto".into());
        args.push(destination.into());
        args
    }

    /// 执行一次转换，阻塞直到完成或超时
    pub fn convert(&self, source: &Path, destination: &Path, is_normal: bool) -> ConversionOutcome {
        let start = Instant::now();

        let mut command = Command::new(&self.executable);
        command
            .args(self.args(source, destination, is_normal))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        // 独立进程组：终端的 Ctrl-C 不会传给正在运行的转换
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                return ConversionOutcome::Exception {
                    message: e.to_string(),
                }
            }
        };

        // stderr 在独立线程中读取，防止管道写满导致子进程阻塞
        let stderr = child.stderr.take();
        let reader = thread::spawn(move || {
            let mut buf = Vec::new();
            if let Some(mut pipe) = stderr {
                let _ = pipe.read_to_end(&mut buf);
            }
            buf
        });

        match wait_with_deadline(&mut child, start, self.timeout) {
            Ok(Some(status)) => {
                let elapsed = start.elapsed();
                let stderr = reader.join().unwrap_or_default();
                if status.success() {
                    ConversionOutcome::Success { elapsed }
                } else {
                    debug!(?status, "converter exited with failure");
                    ConversionOutcome::Failed {
                        diagnostic: decode_diagnostic(&stderr),
                        elapsed,
                    }
                }
            }
            Ok(None) => {
                // 超时：终止整个进程组，不等待读取线程
                if let Err(e) = kill_tree(&mut child) {
                    warn!(error = %e, "failed to kill timed out converter");
                }
                let _ = child.wait();
                ConversionOutcome::TimedOut {
                    elapsed: start.elapsed(),
                }
            }
            Err(e) => {
                let _ = child.kill();
                ConversionOutcome::Exception {
                    message: e.to_string(),
                }
            }
        }
    }
}

/// 轮询等待子进程退出；超过期限返回 `Ok(None)`
fn wait_with_deadline(
    child: &mut Child,
    start: Instant,
    timeout: Duration,
) -> std::io::Result<Option<std::process::ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= timeout {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// 终止子进程及其派生的进程（unix 上为整个进程组）
#[cfg(unix)]
fn kill_tree(child: &mut Child) -> std::io::Result<()> {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    match killpg(Pid::from_raw(child.id() as i32), Signal::SIGKILL) {
        Ok(()) => Ok(()),
        Err(errno) => {
            debug!(%errno, "killpg failed, killing child only");
            child.kill()
        }
    }
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) -> std::io::Result<()> {
    child.kill()
}

/// 宽松解码 stderr：先严格 UTF-8，失败则逐字节映射（Latin-1），保证不再出错
pub fn decode_diagnostic(bytes: &[u8]) -> String {
    let text = match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    };
    let text = text.trim();
    if text.is_empty() {
        return "Unknown error".to_string();
    }
    text.chars().take(DIAGNOSTIC_LIMIT).collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 写一个可执行的 sh 脚本作为转换器替身
    #[cfg(unix)]
    pub(crate) fn stub(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_args_for_color_map() {
        let converter = Converter::new("magick".into(), 1024, Duration::from_secs(60));
        let args = strings(converter.args(Path::new("in.dds"), Path::new("out.dds"), false));
        assert_eq!(
            args,
            vec![
                "in.dds",
                "-blur",
                "0x1.0",
                "-filter",
                "Lanczos",
                "1024x1024>",
                "-define",
                "dds:compression=auto",
                "out.dds"
            ]
        );
    }

    #[test]
    fn test_args_for_normal_map_skip_filter() {
        let converter = Converter::new("magick".into(), 512, Duration::from_secs(60));
        let args = strings(converter.args(Path::new("a_n.dds"), Path::new("b_n.dds"), true));
        assert!(!args.iter().any(|a| a == "-filter" || a == "Lanczos"));
        assert!(args.contains(&"512x512>".to_string()));
        assert_eq!(args.first().map(String::as_str), Some("a_n.dds"));
        assert_eq!(args.last().map(String::as_str), Some("b_n.dds"));
    }

    #[test]
    fn test_decode_diagnostic() {
        assert_eq!(decode_diagnostic(b""), "Unknown error");
        assert_eq!(decode_diagnostic("magick: ошибка\n".as_bytes()), "magick: ошибка");
        assert_eq!(decode_diagnostic(&[b'b', b'a', b'd', 0xff]), "bad\u{ff}");

        let long = vec![b'x'; 500];
        assert_eq!(decode_diagnostic(&long).chars().count(), 200);
    }

    #[test]
    fn test_missing_executable_is_exception() {
        let converter = Converter::new(
            "/no/such/texshrink-magick".into(),
            512,
            Duration::from_secs(5),
        );
        let outcome = converter.convert(Path::new("a.dds"), Path::new("b.dds"), false);
        assert!(matches!(outcome, ConversionOutcome::Exception { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_codes_and_timeout() {
        let tmp = tempfile::TempDir::new().unwrap();

        let ok = stub(tmp.path(), "ok.sh", "exit 0");
        let outcome = Converter::new(ok, 512, Duration::from_secs(10)).convert(
            Path::new("a.dds"),
            Path::new("b.dds"),
            false,
        );
        assert!(outcome.is_success());

        let failing = stub(tmp.path(), "fail.sh", "echo 'no decode delegate' >&2\nexit 1");
        let outcome = Converter::new(failing, 512, Duration::from_secs(10)).convert(
            Path::new("a.dds"),
            Path::new("b.dds"),
            false,
        );
        match outcome {
            ConversionOutcome::Failed { diagnostic, .. } => {
                assert_eq!(diagnostic, "no decode delegate")
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let slow = stub(tmp.path(), "slow.sh", "exec sleep 5");
        let outcome = Converter::new(slow, 512, Duration::from_millis(200)).convert(
            Path::new("a.dds"),
            Path::new("b.dds"),
            false,
        );
        match outcome {
            ConversionOutcome::TimedOut { elapsed } => assert!(elapsed < Duration::from_secs(5)),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_converter_runs_in_own_process_group() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("pgid");
        let script = stub(
            tmp.path(),
            "pgid.sh",
            &format!("ps -o pgid= -p $$ > \"{}\"", out.display()),
        );

        let outcome = Converter::new(script, 512, Duration::from_secs(10)).convert(
            Path::new("a.dds"),
            Path::new("b.dds"),
            false,
        );
        assert!(outcome.is_success());

        let child_pgid: i32 = std::fs::read_to_string(&out).unwrap().trim().parse().unwrap();
        let own_pgid = nix::unistd::getpgrp().as_raw();
        assert_ne!(child_pgid, own_pgid);
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_forked_descendants() {
        let tmp = tempfile::TempDir::new().unwrap();
        let marker = tmp.path().join("late-write");
        let script = stub(
            tmp.path(),
            "wrapper.sh",
            &format!("(sleep 1; touch \"{}\") &\nwait", marker.display()),
        );

        let outcome = Converter::new(script, 512, Duration::from_millis(200)).convert(
            Path::new("a.dds"),
            Path::new("b.dds"),
            false,
        );
        assert!(matches!(outcome, ConversionOutcome::TimedOut { .. }));

        std::thread::sleep(Duration::from_millis(1500));
        assert!(!marker.exists(), "descendant outlived the timeout");
    }
}
