/// One parsed command line, ready for dispatch.
///
/// `argv[0]` always equals `cmd`. A record is built once per input line and
/// dropped after it has been dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub(crate) cmd: String,
    pub(crate) argv: Vec<String>,
    pub(crate) infile: Option<String>,
    pub(crate) outfile: Option<String>,
    pub(crate) background: bool,
}

impl CommandRecord {
    pub fn new(cmd: String) -> Self {
        CommandRecord {
            argv: vec![cmd.clone()],
            cmd,
            infile: None,
            outfile: None,
            background: false,
        }
    }

    pub fn with_arg(mut self, arg: String) -> Self {
        self.argv.push(arg);
        self
    }

    pub fn with_infile(mut self, path: String) -> Self {
        self.infile = Some(path);
        self
    }

    pub fn with_outfile(mut self, path: String) -> Self {
        self.outfile = Some(path);
        self
    }

    pub fn with_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn infile(&self) -> Option<&str> {
        self.infile.as_deref()
    }

    pub fn outfile(&self) -> Option<&str> {
        self.outfile.as_deref()
    }

    pub fn is_background(&self) -> bool {
        self.background
    }
}
