use clap::Parser;
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use voice_expense::utils::logger::{self, LogFormat};
use voice_expense::utils::validation::Validate;
use voice_expense::{CliConfig, OutputFormat, ParsedExpense, ParserConfig, RuleBasedParser};

fn main() {
    let cli = CliConfig::parse();

    let config = match &cli.config {
        Some(path) => ParserConfig::from_file(path),
        None => Ok(ParserConfig::default()),
    };

    // 初始化日誌
    let config_level = config.as_ref().ok().and_then(|c| c.log_level());
    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(&logger::filter_directive(cli.verbose, config_level), format);

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = config.and_then(|config| run(&cli, config)) {
        tracing::error!(
            "❌ Parsing failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn run(cli: &CliConfig, config: ParserConfig) -> voice_expense::Result<()> {
    // 驗證配置
    config.validate()?;

    let parser = RuleBasedParser::rule_based(&config)?;
    tracing::info!(
        "🚀 Parser ready ({} categories, dates from the {:?})",
        parser.vocabulary().categories().len(),
        parser.bias()
    );

    let from_stdin = cli.utterances.is_empty();
    let utterances: Vec<String> = if from_stdin {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()?
            .into_iter()
            .filter(|line| !line.trim().is_empty())
            .collect()
    } else {
        cli.utterances.clone()
    };

    let prompt_missing = cli.prompt_missing && !from_stdin;
    if cli.prompt_missing && from_stdin {
        tracing::warn!("--prompt-missing needs utterances as arguments, stdin is busy");
    }

    let mut expenses = Vec::with_capacity(utterances.len());
    for utterance in &utterances {
        let mut expense = match cli.today {
            Some(today) => parser.parse_on(utterance, today)?,
            None => parser.parse(utterance)?,
        };

        if expense.needs_amount() {
            tracing::warn!("⚠️ No amount found in {:?}", utterance);
            if prompt_missing {
                expense.amount = prompt_amount(utterance)?;
            }
        }
        expenses.push(expense);
    }

    match cli.format {
        OutputFormat::Json => write_json(&expenses)?,
        OutputFormat::Csv => write_csv(&expenses)?,
    }

    tracing::info!("✅ Parsed {} utterance(s)", expenses.len());
    Ok(())
}

/// 金額由使用者手動輸入；空白保留 null，輸入錯誤重問一次
fn prompt_amount(utterance: &str) -> voice_expense::Result<Option<Decimal>> {
    eprintln!("No amount found in: {}", utterance);

    for _ in 0..2 {
        eprint!("Enter amount: ");
        io::stderr().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        match Decimal::from_str(&line.replace(',', "")) {
            Ok(amount) if !amount.is_sign_negative() => return Ok(Some(amount)),
            _ => eprintln!("'{}' is not a valid amount", line),
        }
    }
    Ok(None)
}

fn write_json(expenses: &[ParsedExpense]) -> voice_expense::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for expense in expenses {
        serde_json::to_writer(&mut out, expense)?;
        writeln!(out)?;
    }
    Ok(())
}

fn write_csv(expenses: &[ParsedExpense]) -> voice_expense::Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout().lock());
    writer.write_record(["date", "amount", "category", "description"])?;
    for expense in expenses {
        let amount = expense.amount.map(|a| a.to_string()).unwrap_or_default();
        writer.write_record([
            expense.date_iso().as_str(),
            amount.as_str(),
            expense.category.as_str(),
            expense.description.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
