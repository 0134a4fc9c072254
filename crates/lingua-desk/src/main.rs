fn main() -> anyhow::Result<()> {
    lingua_desk::cli::main()
}
