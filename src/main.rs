use clap::Parser;

mod term;

fn main() {
    term::main(term::Args::parse());
}
