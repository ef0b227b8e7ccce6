use std::io::Cursor;

use crate::answer::Answer;
use crate::error::Result;
use crate::header::{Header, HEADER_SIZE};
use crate::question::Question;

/// A whole DNS datagram. Counts in `header` are written as given, they are
/// not derived from the section lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
}

impl Message {
    pub fn query(id: u16, questions: Vec<Question>) -> Self {
        let header = Header::query(id, questions.len() as u16);

        Self {
            header,
            questions,
            answers: vec![],
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes: Vec<u8> = Vec::with_capacity(crate::MAX_MESSAGE_SIZE);

        self.header.to_bytes(&mut bytes);
        for question in &self.questions {
            question.to_bytes(&mut bytes)?;
        }
        for answer in &self.answers {
            answer.to_bytes(&mut bytes)?;
        }

        Ok(bytes)
    }

    // Queries carry no answers, so only header and questions are read.
    pub fn parse_query(bytes: &[u8]) -> Result<Self> {
        let mut reader = Cursor::new(bytes);

        let header = Header::parse_from_reader(&mut reader)?;
        debug_assert_eq!(reader.position() as usize, HEADER_SIZE);
        let questions = Question::parse_many(&mut reader, header.qd_count())?;

        let msg = Self {
            header,
            questions,
            answers: vec![],
        };

        Ok(msg)
    }

    // 解析 DNS 的响应
    pub fn parse_response(bytes: &[u8]) -> Result<Self> {
        let mut reader = Cursor::new(bytes);

        let header = Header::parse_from_reader(&mut reader)?;
        let questions = Question::parse_many(&mut reader, header.qd_count())?;

        let count = header.answer_count() as usize;
        let mut answers: Vec<Answer> = Vec::with_capacity(count);
        for _ in 0..count {
            answers.push(Answer::parse_from_reader(&mut reader)?);
        }

        let msg = Self {
            header,
            questions,
            answers,
        };

        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DnsError;
    use crate::question::{CLASS_IN, TYPE_A};

    #[test]
    fn to_bytes_test() {
        let mut msg = Message::query(209 * 256 + 183, vec![Question::a_record("baidu.com")]);
        msg.answers.push(Answer {
            name: "baidu.com".to_string(),
            rtype: TYPE_A,
            rclass: CLASS_IN,
            ttl: 60,
            rdata: vec![8, 8, 8, 8],
        });

        let expected = [
            209, 183, 1, 0, 0, 1, 0, 0, 0, 0, 0, 0, // header
            5, 98, 97, 105, 100, 117, 3, 99, 111, 109, 0, 0, 1, 0, 1, // question
            5, 98, 97, 105, 100, 117, 3, 99, 111, 109, 0, 0, 1, 0, 1, // answer name, type, class
            0, 0, 0, 60, 0, 4, 8, 8, 8, 8, // ttl, rdlength, rdata
        ];
        assert_eq!(msg.to_bytes().unwrap(), expected);
    }

    #[test]
    fn parse_query_test() {
        let msg = Message::query(
            42,
            vec![Question::a_record("a.example"), Question::new("b.example", 16, CLASS_IN)],
        );
        let bytes = msg.to_bytes().unwrap();

        assert_eq!(Message::parse_query(&bytes).unwrap(), msg);
    }

    #[test]
    fn parse_query_ignores_trailing_answers() {
        let mut msg = Message::query(1, vec![Question::a_record("z.cn")]);
        msg.header.ancount = 1;
        msg.answers.push(Answer {
            name: "z.cn".to_string(),
            rtype: TYPE_A,
            rclass: CLASS_IN,
            ttl: 1,
            rdata: vec![1, 1, 1, 1],
        });
        let bytes = msg.to_bytes().unwrap();

        let parsed = Message::parse_query(&bytes).unwrap();
        assert_eq!(parsed.questions, msg.questions);
        assert!(parsed.answers.is_empty());

        assert_eq!(Message::parse_response(&bytes).unwrap(), msg);
    }

    #[test]
    fn zero_questions() {
        let bytes = Message::query(9, vec![]).to_bytes().unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE);

        let parsed = Message::parse_query(&bytes).unwrap();
        assert!(parsed.questions.is_empty());
    }

    #[test]
    fn qdcount_larger_than_body() {
        let mut bytes = Message::query(9, vec![Question::a_record("z.cn")]).to_bytes().unwrap();
        bytes[5] = 2;

        assert!(matches!(
            Message::parse_query(&bytes),
            Err(DnsError::MalformedName { .. })
        ));
    }

    #[test]
    fn short_datagram() {
        assert_eq!(Message::parse_query(&[1, 2, 3]), Err(DnsError::MalformedHeader(3)));
    }
}
