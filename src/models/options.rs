//! # 批处理配置
//!
//! 一次运行所需的全部选项，在工作线程启动之前统一校验。
//!
//! ## 依赖关系
//! - 被 `cli/`, `batch/`, `commands/` 使用
//! - 使用 `error.rs`

use crate::error::{Result, ShrinkError};

use clap::ValueEnum;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// 单个文件的转换超时
pub const CONVERT_TIMEOUT: Duration = Duration::from_secs(60);

/// 目标分辨率
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum Resolution {
    /// 0.5K
    #[default]
    #[value(name = "512")]
    Half,
    /// 1K
    #[value(name = "1024")]
    One,
    /// 2K
    #[value(name = "2048")]
    Two,
    /// 4K
    #[value(name = "4096")]
    Four,
}

impl Resolution {
    pub fn pixels(self) -> u32 {
        match self {
            Resolution::Half => 512,
            Resolution::One => 1024,
            Resolution::Two => 2048,
            Resolution::Four => 4096,
        }
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

/// 处理模式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum ProcessingMode {
    /// Process every texture
    #[default]
    All,
    /// Skip normal maps (*_n, *_msn)
    SkipNormals,
    /// Process normal maps only
    OnlyNormals,
}

impl ProcessingMode {
    pub fn includes(self, is_normal: bool) -> bool {
        match self {
            ProcessingMode::All => true,
            ProcessingMode::SkipNormals => !is_normal,
            ProcessingMode::OnlyNormals => is_normal,
        }
    }
}

impl std::fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingMode::All => write!(f, "all"),
            ProcessingMode::SkipNormals => write!(f, "skip-normals"),
            ProcessingMode::OnlyNormals => write!(f, "only-normals"),
        }
    }
}

/// 输出方式（命令行选项）
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputMethod {
    /// Mirror into a sibling `<name>_low_res` folder
    #[default]
    Folder,
    /// Package each input into `<name>_low_res.zip`
    Zip,
}

/// 输出目标
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Folder,
    Zip { dir: PathBuf },
}

impl OutputTarget {
    /// 由命令行选项组合出输出目标，zip 模式必须给出目录
    pub fn from_method(method: OutputMethod, zip_dir: Option<PathBuf>) -> Result<Self> {
        match method {
            OutputMethod::Folder => Ok(OutputTarget::Folder),
            OutputMethod::Zip => zip_dir
                .map(|dir| OutputTarget::Zip { dir })
                .ok_or(ShrinkError::MissingZipDir),
        }
    }
}

/// 一次批处理运行的配置
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub converter: PathBuf,
    pub resolution: Resolution,
    pub mode: ProcessingMode,
    pub output: OutputTarget,
    timeout: Duration,
}

impl BatchConfig {
    pub fn new(
        converter: PathBuf,
        resolution: Resolution,
        mode: ProcessingMode,
        output: OutputTarget,
    ) -> Self {
        Self {
            converter,
            resolution,
            mode,
            output,
            timeout: CONVERT_TIMEOUT,
        }
    }

    #[cfg(test)]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 在接触任何文件之前校验配置
    pub fn validate(&self) -> Result<()> {
        if !self.converter.is_file() {
            return Err(ShrinkError::InvalidConverter {
                path: self.converter.display().to_string(),
            });
        }

        if let OutputTarget::Zip { dir } = &self.output {
            fs::create_dir_all(dir).map_err(|e| ShrinkError::write(dir, e))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_mode_includes() {
        assert!(ProcessingMode::All.includes(true));
        assert!(ProcessingMode::All.includes(false));
        assert!(ProcessingMode::SkipNormals.includes(false));
        assert!(!ProcessingMode::SkipNormals.includes(true));
        assert!(ProcessingMode::OnlyNormals.includes(true));
        assert!(!ProcessingMode::OnlyNormals.includes(false));
    }

    #[test]
    fn test_resolution_values() {
        let parsed = Resolution::from_str("2048", false).unwrap();
        assert_eq!(parsed, Resolution::Two);
        assert_eq!(parsed.pixels(), 2048);
        assert!(Resolution::from_str("300", false).is_err());
    }

    #[test]
    fn test_zip_requires_dir() {
        assert!(matches!(
            OutputTarget::from_method(OutputMethod::Zip, None),
            Err(ShrinkError::MissingZipDir)
        ));
        assert_eq!(
            OutputTarget::from_method(OutputMethod::Folder, None).unwrap(),
            OutputTarget::Folder
        );
    }

    #[test]
    fn test_validate_rejects_missing_converter() {
        let tmp = TempDir::new().unwrap();
        let config = BatchConfig::new(
            tmp.path().join("magick.exe"),
            Resolution::default(),
            ProcessingMode::All,
            OutputTarget::Folder,
        );
        let err = config.validate().unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_validate_creates_zip_dir() {
        let tmp = TempDir::new().unwrap();
        let converter = tmp.path().join("magick");
        fs::write(&converter, b"").unwrap();
        let zip_dir = tmp.path().join("out/zips");

        let config = BatchConfig::new(
            converter,
            Resolution::One,
            ProcessingMode::All,
            OutputTarget::Zip {
                dir: zip_dir.clone(),
            },
        );
        config.validate().unwrap();
        assert!(zip_dir.is_dir());
        assert_eq!(config.timeout(), CONVERT_TIMEOUT);
    }
}
