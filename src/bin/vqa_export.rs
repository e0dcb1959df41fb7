use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    vqa_gallery::apps::run_export(std::env::args().skip(1))
}
