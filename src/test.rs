//! Fixtures shared by the unit tests, integration tests and benchmarks

use crate::types::*;
use crate::vocab::*;
use crate::AnagramModel;

///A small dictionary in the tab-separated source format
pub const TEST_DICTIONARY: &str = "\
n\tnightwalker\taeghiklnrtw\tSomeone who walks about at night\n\
n\tgran\tagnr\tA grandmother\n\
n\tpeach\tacehp\tA sweet juicy fruit\n\
n\tnotes\tenost\tShort written records\n\
n\tstone\tenost\tA lump of rock\n\
n\ttones\tenost\tSounds of distinct pitch\n\
n\tlizard\tadilrz\tA reptile with a long tail\n\
n\twalker\taeklrw\tA person who travels on foot\n\
n\theron\tehnor\tA wading bird\n\
n\towl\tlow\tA nocturnal bird of prey\n\
n\tangel\taegln\tA spiritual being\n\
n\tcheque\tceehqu\tA written order to pay money\n\
j\twily\tilwy\tMarked by skill in deception\n\
j\tnuclear\tacelnru\tOf or relating to the nucleus\n\
j\tensuing\teginnsu\tFollowing in time\n\
j\tquiet\teiqtu\tMaking little noise\n\
j\thonest\tehnost\tNot disposed to cheat\n\
j\teager\taeegr\tHaving keen desire\n\
j\tred\tder\tOf the colour of blood\n\
j\tclean\taceln\tFree from dirt\n\
v\tlisten\teilnst\tHear with intention\n\
v\tsing\tgins\tProduce tones with the voice\n\
v\tgreet\teegrt\tExpress greetings upon meeting\n\
a\tsilently\teillnsty\tWithout speaking\n\
a\tbadly\tabdly\tIn a poor manner\n\
a\teagerly\taeeglry\tWith eagerness\n\
f\tKelly\teklly\n\
f\tAngela\taaegln\n\
f\tStephanie\taeehinpst\n\
f\tAnna\taann\n\
f\tQuin\tinqu\n\
f\tHelen\teehln\n\
l\tWainwright\taghiinrtww\n\
l\tCurran\tacnrru\n\
l\tCheung\tceghnu\n\
l\tTostee\teeostt\n\
l\tWalker\taeklrw\n\
";

pub fn get_test_dictionary() -> WordDictionary {
    WordDictionary::parse(TEST_DICTIONARY, &DictionaryParams::strict()).expect("test dictionary should parse")
}

pub fn get_test_model() -> AnagramModel {
    AnagramModel::new(get_test_dictionary(), SearchParameters::default()).expect("test model should build")
}
