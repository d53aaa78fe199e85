/*!

  Instructions are single 32 bit words in the MIPS style. The six high bits are the
  opcode. Three encoding formats are in use:

    R_FORMAT:         [opcode:6][rs:5][rt:5][rd:5][unused:5][funct:6]
    I_FORMAT:         [opcode:6][rs:5][rt:5][immediate:16]
    I_BRANCH_FORMAT:  [opcode:6][rs:5][unused:5][offset:16]

  Every R_FORMAT instruction shares opcode zero and is told apart by its funct code. The
  other formats are identified by opcode alone.

  The layout of each individual instruction is given by a bit-pattern template such as
  `000000 fffff sssss ddddd 00000 000001`, in which `0` and `1` are fixed bits and runs of
  letters are fields. See `pattern` for how templates are read.

  Immediates are not sign-extended by the decoder. The decoded operand for a 16 bit field
  is the raw unsigned pattern, and the execution routine is responsible for widening it
  with `sign_extend16`.

*/

mod binary;
mod instruction;
mod pattern;

pub use binary::{funct_of, opcode_of, sign_extend16, Word, FUNCT_MASK, OPCODE_SHIFT};
pub use instruction::{EncodingKey, Format, Operation};
pub use pattern::{BitPattern, Field, FieldSlot};
