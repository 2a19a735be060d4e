use crate::cli::RunArgs;
use crate::exit_codes;
use crate::output;
use seqproc::{ProcessorConfig, TaskProcessor};
use std::sync::Arc;
use std::time::Duration;

pub async fn execute(args: RunArgs) -> i32 {
    let batch = match args.input.to_batch() {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
    };

    // clap already resolved --delay-ms and $SEQPROC_DELAY_MS; the library
    // config only supplies the default when neither is set
    let config = match args.delay_ms {
        Some(ms) => ProcessorConfig::default().with_default_delay(Duration::from_millis(ms)),
        None => match ProcessorConfig::from_env() {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                return exit_codes::INPUT_ERROR;
            }
        },
    };

    let processor = Arc::new(TaskProcessor::from_config(&config));
    let delay = processor.default_delay();
    log::debug!("Inter-item delay resolved to {}ms", delay.as_millis());

    if let Some(ms) = args.cancel_after_ms {
        let canceller = Arc::clone(&processor);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            canceller.cancel();
        });
    }

    let interrupt = processor.cancellation_token();
    let quiet = args.quiet;
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            if !quiet {
                eprintln!("Interrupted, stopping before the next item...");
            }
            interrupt.cancel();
        }
    });

    if !args.quiet {
        eprintln!(
            "Processing {} item(s) with {} ms delay...",
            batch.len(),
            delay.as_millis()
        );
    }

    let result = processor
        .run(batch, None, |progress| {
            if !quiet {
                eprintln!("Progress: {}", progress);
            }
        })
        .await;

    let outcome = match result {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
    };

    log::debug!(
        "Run {} finished as {} ({}/{})",
        outcome.run_id,
        outcome.state,
        outcome.processed,
        outcome.total
    );

    let rendered = if args.json {
        match output::to_json(&outcome, args.compact) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Error serializing result: {}", e);
                return exit_codes::EXECUTION_ERROR;
            }
        }
    } else {
        output::summarize(&outcome)
    };

    if let Err(e) = output::write_output(&rendered, args.output.as_deref()) {
        eprintln!("Error: {}", e);
        return exit_codes::EXECUTION_ERROR;
    }

    if !args.quiet {
        if let Some(ref path) = args.output {
            eprintln!("Results written to {}", path);
        }
    }

    exit_codes::SUCCESS
}
