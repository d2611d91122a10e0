use rotating_avl::Tree;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn main() {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("logger is installed once");

    let sequence = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "10, 20, 30, 40, 50, 25".to_owned());

    let mut tree = Tree::<i64>::new();
    match tree.insert_sequence(&sequence) {
        Ok(rotations) => {
            for rotation in rotations {
                println!("Rotation: {}", rotation);
            }
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
    println!("{}", tree.stats());

    println!("Level-order traversal:");
    tree.traverse_level_order(|node, depth| {
        println!(
            "{}Key: {}, Height: {}, BF: {}",
            "  ".repeat(depth),
            node.key(),
            node.height(),
            node.balance_factor()
        );
    });
}
