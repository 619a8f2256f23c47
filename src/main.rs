//! gan_primer 命令行：每个子命令对应教程中的一个小节

use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::FmtSubscriber;

use gan_primer::gan::GanConfig;
use gan_primer::lessons::regression::RegressionConfig;
use gan_primer::lessons::{autograd, dataset, gan, networks, regression, tensor_basics, versions};

#[derive(Parser)]
#[command(name = "gan_primer", version)]
#[command(about = "从张量、自动微分到 GAN 训练的入门演示", long_about = None)]
struct Cli {
    /// JSON 配置文件：{"gan": {...}, "regression": {...}}，缺省字段取默认值
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 日志级别（error, warn, info, debug, trace）
    #[arg(long, global = true, default_value = "info")]
    verbosity: tracing::Level,

    /// 以 JSON 输出报告
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 版本信息
    Versions,
    /// 张量基础
    Tensors {
        /// 随机矩阵的种子
        #[arg(long, default_value = "0")]
        seed: u64,
    },
    /// 构建 G 与 D 并前向传播
    Networks,
    /// 加载 MNIST 并分批
    Dataset(DataArgs),
    /// 标量函数的自动微分
    Autograd,
    /// 手写 SGD 与优化器 SGD 拟合直线
    Regression {
        #[arg(long)]
        epochs: Option<usize>,
        #[arg(long)]
        lr: Option<f32>,
    },
    /// 对抗训练并展示样本
    Train(TrainArgs),
    /// 依次运行所有小节
    All(TrainArgs),
}

#[derive(Args, Clone)]
struct DataArgs {
    /// 不下载 MNIST，改用合成数据
    #[arg(long)]
    offline: bool,

    /// MNIST 文件所在目录
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// 只用前若干个训练样本
    #[arg(long)]
    limit: Option<usize>,

    #[arg(long)]
    batch_size: Option<usize>,
}

#[derive(Args, Clone)]
struct TrainArgs {
    #[command(flatten)]
    data: DataArgs,

    #[arg(long)]
    epochs: Option<usize>,

    #[arg(long)]
    lr: Option<f32>,

    /// 用于可视化的固定噪声个数
    #[arg(long)]
    samples: Option<usize>,

    /// 每轮保存样本网格的目录
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

/// 配置文件的整体结构
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct FileConfig {
    gan: GanConfig,
    regression: RegressionConfig,
}

impl FileConfig {
    fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件 {} 失败", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("解析配置文件 {} 失败", path.display()))?;
        Ok(config)
    }
}

impl DataArgs {
    fn apply(&self, config: &mut GanConfig) {
        config.offline |= self.offline;
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        if let Some(limit) = self.limit {
            config.train_limit = Some(limit);
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
    }
}

impl TrainArgs {
    fn apply(&self, config: &mut GanConfig) {
        self.data.apply(config);
        if let Some(epochs) = self.epochs {
            config.epochs = epochs;
        }
        if let Some(lr) = self.lr {
            config.learning_rate = lr;
        }
        if let Some(samples) = self.samples {
            config.num_samples = samples;
        }
        if let Some(dir) = &self.out_dir {
            config.out_dir = Some(dir.clone());
        }
    }
}

fn emit<T: Serialize + Display>(report: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

fn run_regression(config: &RegressionConfig, json: bool) -> Result<()> {
    emit(&regression::run_manual(config)?, json)?;
    emit(&regression::run_with_optimizer(config)?, json)
}

fn run(cli: Cli) -> Result<()> {
    let FileConfig {
        gan: mut gan_config,
        regression: mut regression_config,
    } = FileConfig::load(cli.config.as_deref())?;
    let json = cli.json;

    match cli.command {
        Commands::Versions => emit(&versions::report(), json)?,
        Commands::Tensors { seed } => emit(&tensor_basics::run(seed), json)?,
        Commands::Networks => emit(&networks::run(&gan_config)?, json)?,
        Commands::Dataset(args) => {
            args.apply(&mut gan_config);
            emit(&dataset::run(&gan_config)?, json)?;
        }
        Commands::Autograd => emit(&autograd::run()?, json)?,
        Commands::Regression { epochs, lr } => {
            if let Some(epochs) = epochs {
                regression_config.epochs = epochs;
            }
            if let Some(lr) = lr {
                regression_config.learning_rate = lr;
            }
            run_regression(&regression_config, json)?;
        }
        Commands::Train(args) => {
            args.apply(&mut gan_config);
            gan_config.validate()?;
            emit(&gan::train(&gan_config)?, json)?;
        }
        Commands::All(args) => {
            args.apply(&mut gan_config);
            gan_config.validate()?;
            emit(&versions::report(), json)?;
            emit(&tensor_basics::run(gan_config.seed), json)?;
            emit(&networks::run(&gan_config)?, json)?;
            emit(&dataset::run(&gan_config)?, json)?;
            emit(&autograd::run()?, json)?;
            run_regression(&regression_config, json)?;
            emit(&gan::train(&gan_config)?, json)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.verbosity)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("初始化日志失败: {e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
