use optfactory::{parse, DeclaredType, OptionDefinition, Registry};

fn main() {
    let mut registry = Registry::new();
    registry
        .register(
            OptionDefinition::builder("list", DeclaredType::composite::<Vec<String>>())
                .alias("-l")
                .help("The words to join.")
                .build(),
        )
        .expect("valid configuration");
    registry
        .register(
            OptionDefinition::builder("separator", DeclaredType::string())
                .alias("-s")
                .build(),
        )
        .expect("valid configuration");

    let input = std::env::args().skip(1).collect::<Vec<String>>().join(" ");

    match parse(&input, &registry) {
        Ok(result) => {
            let words: Vec<String> = result.value("list").unwrap_or_default();
            let separator: String = result.value("separator").unwrap_or_else(|_| " ".to_string());
            println!("{}", words.join(&separator));
        }
        Err(error) => {
            eprintln!("Parse error: {error}");
            std::process::exit(1);
        }
    }
}
