use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    multichat::cli::main()
}
