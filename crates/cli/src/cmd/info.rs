use anyhow::Result;

use extbuild_lib::build::BuildOptions;
use extbuild_lib::platform::platform_tag;

use crate::output::print_stat;

pub fn cmd_info() -> Result<()> {
  let options = BuildOptions::default();

  println!("System:");
  match platform_tag() {
    Some(tag) => print_stat("Platform", &tag),
    _ => println!("Could not detect platform."),
  }
  print_stat("Architecture", options.arch.as_str());
  print_stat("Module suffix", &options.ext_suffix);
  print_stat("Toolchain", &options.toolchain);
  print_stat("Temp root", &options.temp_root.display().to_string());
  print_stat("Lib root", &options.lib_root.display().to_string());

  Ok(())
}
