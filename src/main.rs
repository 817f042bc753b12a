use std::io;

use zoomify_batch::action::cli::process_args;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let summary = process_args(args).map_err(|e| {
        log::error!("程式執行失敗：{}", e);
        e
    })?;
    log::info!("程式執行完成：{}", summary);
    println!("完成！{}", summary);
    Ok(())
}
