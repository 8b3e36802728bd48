pub const CMD_RUN: &str = "run";
pub const CMD_EXPORT: &str = "export";
pub const CMD_OPEN: &str = "open";
pub const CMD_CLOSE: &str = "close";
pub const CMD_BACKDROP: &str = "backdrop";
pub const CMD_CONTENT: &str = "content";
pub const CMD_KEY: &str = "key";
pub const CMD_DISMISS: &str = "ok";
pub const CMD_HELP: &str = "help";
pub const CMD_QUIT: &str = "quit";

pub const HELP_TEXT: &str = "\
Polecenia:
  run            uruchom generowanie
  export         pobierz wyniki do pliku
  open <n>       pokaż szczegóły karty n
  close          zamknij szczegóły
  backdrop       kliknij tło okna szczegółów
  content        kliknij treść okna szczegółów
  key <klucz>    zapisz klucz API
  ok             zamknij komunikat
  help           ta pomoc
  quit           wyjście";

/// Escape sequence that clears the terminal and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
