use crate::cli::ValidateArgs;
use crate::exit_codes;
use crate::output;
use seqproc::RunState;
use serde::Serialize;

#[derive(Serialize)]
struct ValidateOutput {
    valid: bool,
    state: RunState,
    items: Option<usize>,
    error: Option<String>,
}

pub fn execute(args: ValidateArgs) -> i32 {
    let result = match args.input.to_batch() {
        Ok(batch) => ValidateOutput {
            valid: true,
            state: RunState::NotStarted,
            items: Some(batch.len()),
            error: None,
        },
        Err(e) => ValidateOutput {
            valid: false,
            state: RunState::Failed,
            items: None,
            error: Some(e.to_string()),
        },
    };

    if args.json {
        let written = output::to_json(&result, false)
            .and_then(|json| output::write_output(&json, None));
        if let Err(e) = written {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    } else if let Some(ref err) = result.error {
        eprintln!("Error: {}", err);
    } else {
        println!("Batch is valid ({} items)", result.items.unwrap_or(0));
    }

    if result.valid {
        exit_codes::SUCCESS
    } else {
        exit_codes::INPUT_ERROR
    }
}
