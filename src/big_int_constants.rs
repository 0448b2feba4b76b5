/// Hard ceiling on the limb count; a shift that would push the length past
/// this saturates the value to zero.
pub const MAX_CAP: usize = 1 << 63;

/// Operand length (in limbs) above which multiplication switches from the
/// schoolbook loop to the convolution path.
pub const FFT_THRESHOLD: usize = 24;

pub const DIGITS: [char; 36] = [
    '0' , '1' , '2' , '3' , '4' , '5' ,
    '6' , '7' , '8' , '9' , 'a' , 'b' ,
    'c' , 'd' , 'e' , 'f' , 'g' , 'h' ,
    'i' , 'j' , 'k' , 'l' , 'm' , 'n' ,
    'o' , 'p' , 'q' , 'r' , 's' , 't' ,
    'u' , 'v' , 'w' , 'x' , 'y' , 'z'
];
