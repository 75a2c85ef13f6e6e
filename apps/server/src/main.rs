fn main() -> anyhow::Result<()> {
    otopark_lib::run()
}
