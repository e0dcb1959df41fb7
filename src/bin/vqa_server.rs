use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    vqa_gallery::apps::run_server(std::env::args().skip(1))
}
