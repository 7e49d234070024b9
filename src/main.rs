fn main() -> anyhow::Result<()> {
    wtrash_lib::run()
}
