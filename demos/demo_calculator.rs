use optfactory::derive::OptionEnum;
use optfactory::prelude::*;
use optfactory::{ConsoleFactory, DeclaredType, OptionDefinition, Value};

#[derive(Debug, OptionEnum)]
enum Operation {
    #[optfactory(rename = "PLUS")]
    Plus,
    #[optfactory(rename = "MINUS")]
    Minus,
}

fn main() {
    let mut factory = ConsoleFactory::new("calculator")
        .option(
            OptionDefinition::builder("a", DeclaredType::integer())
                .alias("-a")
                .mandatory(true)
                .help("The left operand.")
                .build(),
        )
        .option(
            OptionDefinition::builder("b", DeclaredType::integer())
                .aliases(["-b", "--b"])
                .mandatory(true)
                .help("The right operand.")
                .build(),
        )
        .option(
            OptionDefinition::builder("operation", DeclaredType::enumeration::<Operation>())
                .aliases(Operation::VARIANTS.iter().copied())
                .alias("-op")
                .default_value(Value::Variant(Operation::Plus.variant().to_string()))
                .help("The operation to apply.")
                .build(),
        )
        .option(
            OptionDefinition::builder("verbose", DeclaredType::bool())
                .alias("-v")
                .default_value(Value::Bool(true))
                .help("Show the operands.")
                .build(),
        )
        .consumer(|result| {
            let a: i64 = result.value("a").unwrap();
            let b: i64 = result.value("b").unwrap();
            let operation = result
                .variant::<Operation>("operation")
                .unwrap_or(Operation::Plus);
            let answer = match operation {
                Operation::Plus => a + b,
                Operation::Minus => a - b,
            };

            if result.value::<bool>("verbose").unwrap_or(false) {
                println!("{a} {} {b} = {answer}", operation.variant());
            } else {
                println!("{answer}");
            }
        });

    factory.run_env();
}
