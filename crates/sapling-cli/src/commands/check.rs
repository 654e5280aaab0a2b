use super::model::{ModelArgs, load_model};

pub struct CheckArgs {
    pub model: ModelArgs,
}

pub fn run(args: CheckArgs) {
    if let Err(msg) = load_model(&args.model) {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}
