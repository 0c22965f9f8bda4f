pub const CMD_NEXT: &str = ":next";
pub const CMD_BACK: &str = ":back";
pub const CMD_SUBMIT: &str = ":submit";
pub const CMD_EDIT: &str = ":edit";
pub const CMD_FILE: &str = ":file";
pub const CMD_PLACE: &str = ":place";
pub const CMD_HELP: &str = ":help";
pub const CMD_QUIT: &str = ":quit";

pub const HELP_TEXT: &str = "\
Enter values as `field = value`, e.g. `name = Ada Lovelace`.
  :next            validate this step and continue
  :back            return to the previous step
  :edit <step>     jump to a step (1-based), e.g. from the review
  :file <path>     select the photo ID document
  :place <json>    select an autocomplete place (inline JSON or a .json file)
  :submit          submit the registration (last step only)
  :quit            leave without submitting";
