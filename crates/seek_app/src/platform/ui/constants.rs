pub const APP_TITLE: &str = "ShallowSeek";

pub const CMD_UPLOAD: &str = ":upload";
pub const CMD_SEARCH: &str = ":search";
pub const CMD_HELP: &str = ":help";
pub const CMD_QUIT: &str = ":quit";
pub const CMD_QUIT_SHORT: &str = ":q";

pub const HELP_TEXT: &str = "\
Type a query and press Enter to search.
  :upload <file>...   upload files (quote paths containing spaces)
  :search <query>     search explicitly
  :help               show this text
  :quit               exit";

pub const PROGRESS_BAR_CELLS: usize = 20;
