use sapling_lib::ModelPrinter;

use super::model::{ModelArgs, load_model};

pub struct DumpArgs {
    pub model: ModelArgs,
    pub methods: bool,
}

pub fn run(args: DumpArgs) {
    let model = match load_model(&args.model) {
        Ok(model) => model,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };

    print!(
        "{}",
        ModelPrinter::new(&model).with_methods(args.methods).dump()
    );
}
