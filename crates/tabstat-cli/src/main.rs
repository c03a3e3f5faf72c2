mod command;
mod dataset;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
