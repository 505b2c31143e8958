fn main() -> anyhow::Result<()> {
    pqbench_cli::run()
}
